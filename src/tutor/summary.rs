//! Parsing of model-written chapter summaries.

use serde::Deserialize;

use crate::types::ChapterSummary;
use crate::{Result, ScholiaError};

/// Loose wire shape; models disagree on key casing and omit fields.
#[derive(Deserialize)]
struct RawSummary {
    #[serde(default)]
    summary: String,
    #[serde(default, rename = "keyPoints", alias = "key_points")]
    key_points: Vec<String>,
    #[serde(default)]
    concepts: Vec<String>,
}

/// Parse a provider reply into a [`ChapterSummary`].
///
/// Accepts a bare JSON object, one wrapped in a Markdown code fence, or one
/// surrounded by prose. Blank list items are dropped. Fails with
/// `MalformedSummary` when no object can be decoded, the summary is blank,
/// or no key point remains.
pub fn parse_summary(raw: &str) -> Result<ChapterSummary> {
    let json = extract_object(raw)
        .ok_or_else(|| ScholiaError::MalformedSummary("no JSON object in reply".into()))?;

    let parsed: RawSummary = serde_json::from_str(json)
        .map_err(|e| ScholiaError::MalformedSummary(e.to_string()))?;

    let summary = parsed.summary.trim().to_string();
    if summary.is_empty() {
        return Err(ScholiaError::MalformedSummary("empty summary".into()));
    }

    let key_points = clean(parsed.key_points);
    if key_points.is_empty() {
        return Err(ScholiaError::MalformedSummary("no key points".into()));
    }

    Ok(ChapterSummary {
        summary,
        key_points,
        concepts: clean(parsed.concepts),
    })
}

/// Slice from the first `{` to the last `}`, which also discards code fences.
fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn clean(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
