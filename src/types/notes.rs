//! Study note variants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScholiaError;

/// Kind of study notes to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Comprehensive,
    Summary,
    KeyPoints,
    StudyGuide,
    Flashcards,
}

impl NoteType {
    pub const ALL: [NoteType; 5] = [
        NoteType::Comprehensive,
        NoteType::Summary,
        NoteType::KeyPoints,
        NoteType::StudyGuide,
        NoteType::Flashcards,
    ];

    /// Stable identifier, also used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Comprehensive => "comprehensive",
            NoteType::Summary => "summary",
            NoteType::KeyPoints => "key_points",
            NoteType::StudyGuide => "study_guide",
            NoteType::Flashcards => "flashcards",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            NoteType::Comprehensive => "Comprehensive Notes",
            NoteType::Summary => "Summary Notes",
            NoteType::KeyPoints => "Key Points",
            NoteType::StudyGuide => "Study Guide",
            NoteType::Flashcards => "Flashcards",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteType {
    type Err = ScholiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        NoteType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ScholiaError::InvalidInput(format!("unknown note type: {s}")))
    }
}
