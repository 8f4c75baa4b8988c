//! Deterministic fallback content.
//!
//! Served when no provider in the chain produced usable output. Everything
//! here is a pure function of its arguments: no I/O, no clock, no
//! randomness, and never an empty string or empty field.

use crate::types::{ChapterSummary, NoteType};

/// Sentences shorter than this (after trimming) are skipped.
const MIN_SENTENCE_CHARS: usize = 20;

/// Sentences pulled from the subject content for fallback text.
pub const MAX_KEY_SENTENCES: usize = 3;

/// Extract up to `max` candidate sentences from `content`.
///
/// A sentence is a `.`-delimited segment longer than 20 characters after
/// trimming. Order of appearance is preserved.
pub fn key_sentences(content: &str, max: usize) -> Vec<&str> {
    content
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(max)
        .collect()
}

/// Apology-plus-guidance answer that echoes the question.
pub fn answer_fallback(question: &str, title: &str, content: &str) -> String {
    let sentences = key_sentences(content, MAX_KEY_SENTENCES);
    let title = display_title(title);
    let question = question.trim();

    let mut out = format!(
        "I'm sorry, I'm having trouble reaching the AI tutor right now, so I can't give a full answer to your question:\n\n\"{question}\"\n\n"
    );

    if sentences.is_empty() {
        out.push_str(&format!(
            "In the meantime, review \"{title}\" and look for the definitions, headings and examples that relate to your question. "
        ));
        out.push_str("Writing down what you already know about the topic often makes the answer clearer.\n\n");
    } else {
        out.push_str(&format!(
            "Here are some key points from \"{title}\" that may help:\n\n"
        ));
        for (i, sentence) in sentences.iter().enumerate() {
            out.push_str(&format!("{}. {sentence}.\n", i + 1));
        }
        out.push('\n');
    }

    out.push_str("Please try asking again in a few moments for a complete answer.");
    out
}

/// Multi-section study notes built from a fixed template.
pub fn notes_fallback(title: &str, content: &str, note_type: NoteType) -> String {
    let sentences = key_sentences(content, MAX_KEY_SENTENCES);
    let title = display_title(title);

    let mut out = format!("# {}: {title}\n\n", note_type.label());

    out.push_str("## Overview\n\n");
    out.push_str(&format!(
        "These notes cover \"{title}\". The AI note generator is temporarily unavailable, so this outline was assembled directly from the chapter content. Generate the notes again shortly for a complete version.\n\n"
    ));

    out.push_str("## Key Points\n\n");
    if sentences.is_empty() {
        out.push_str("- Identify the main idea of each section of the chapter.\n");
        out.push_str("- Note every term that is defined or highlighted.\n");
        out.push_str("- Record one example for each concept.\n");
    } else {
        for sentence in &sentences {
            out.push_str(&format!("- {sentence}.\n"));
        }
    }
    out.push('\n');

    out.push_str("## Study Framework\n\n");
    out.push_str("1. **Preview**: skim headings and summaries to map the chapter.\n");
    out.push_str("2. **Read actively**: restate each paragraph in your own words.\n");
    out.push_str("3. **Connect**: link new ideas to concepts you already know.\n");
    out.push_str("4. **Recall**: close the material and write down what you remember.\n");
    out.push_str("5. **Review**: revisit the gaps you found during recall.\n\n");

    out.push_str("## Next Steps\n\n");
    out.push_str("- Turn each key point into a question and answer it from memory.\n");
    out.push_str("- Ask the tutor about anything that remains unclear.\n");
    out.push_str("- Try generating these notes again for an AI-written version.\n");
    out
}

/// Static chapter summary parameterised only by the title.
pub fn summary_fallback(title: &str) -> ChapterSummary {
    let title = display_title(title);
    ChapterSummary {
        summary: format!(
            "This chapter introduces the core ideas of {title}. Review the key points and concepts below to build a solid understanding of the material."
        ),
        key_points: vec![
            "Understand the fundamental definitions introduced in the chapter".to_string(),
            "Identify how the main ideas relate to one another".to_string(),
            "Work through the examples to see the concepts applied".to_string(),
            "Review the material regularly to reinforce retention".to_string(),
        ],
        concepts: vec![
            "Core definitions".to_string(),
            "Key principles".to_string(),
            "Practical applications".to_string(),
            "Review and practice".to_string(),
        ],
    }
}

fn display_title(title: &str) -> &str {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        "this chapter"
    } else {
        trimmed
    }
}
