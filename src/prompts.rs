//! Prompt construction for each tutoring operation.

use crate::types::NoteType;

/// Subject content beyond this many characters is cut before prompting.
pub const MAX_CONTEXT_CHARS: usize = 12_000;

/// A `(system, user)` prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Chapter summary; the model must reply with a JSON object.
pub fn summary(title: &str, content: &str) -> Prompt {
    let system = "You are an expert educational content summarizer. \
        Respond ONLY with a valid JSON object of the form \
        {\"summary\": string, \"keyPoints\": [string], \"concepts\": [string]}. \
        The summary is 2-3 sentences. Give 3-6 key points and 3-6 short concept labels. \
        Do not wrap the JSON in Markdown."
        .to_string();
    let user = format!(
        "Summarize the chapter \"{title}\".\n\nChapter content:\n{}",
        clip(content)
    );
    Prompt { system, user }
}

/// Question answering grounded in the chapter content.
pub fn answer(question: &str, title: &str, content: &str) -> Prompt {
    let system = format!(
        "You are a patient, encouraging tutor helping a student with the chapter \"{title}\". \
        Answer using the chapter content below as your primary source. \
        If the content does not cover the question, say so and give the best general explanation you can. \
        Keep answers clear and well structured, and use examples where they help.\n\n\
        Chapter content:\n{}",
        clip(content)
    );
    Prompt {
        system,
        user: question.trim().to_string(),
    }
}

/// Study notes of the requested type, with optional extra instructions.
pub fn notes(title: &str, content: &str, note_type: NoteType, custom_prompt: Option<&str>) -> Prompt {
    let system = "You are an expert study-notes writer. Produce well organised Markdown \
        notes that help a student learn and revise the material."
        .to_string();

    let style = match note_type {
        NoteType::Comprehensive => {
            "Write comprehensive notes: an overview, detailed sections for each main topic, \
            definitions of key terms, examples, and a short recap."
        }
        NoteType::Summary => "Write concise summary notes of no more than one page.",
        NoteType::KeyPoints => "List the key points as short bullet points grouped by topic.",
        NoteType::StudyGuide => {
            "Write a study guide: learning objectives, key concepts, practice questions \
            with answers, and a revision checklist."
        }
        NoteType::Flashcards => {
            "Write 10-15 flashcards as \"Q:\" / \"A:\" pairs covering the most important facts."
        }
    };

    let mut user = format!(
        "{style}\n\nChapter: \"{title}\"\n\nChapter content:\n{}",
        clip(content)
    );
    if let Some(extra) = custom_prompt.map(str::trim).filter(|s| !s.is_empty()) {
        user.push_str("\n\nAdditional instructions: ");
        user.push_str(extra);
    }
    Prompt { system, user }
}

/// Cut `content` to [`MAX_CONTEXT_CHARS`] characters on a char boundary.
fn clip(content: &str) -> &str {
    match content.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
