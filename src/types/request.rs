//! Completion request sent down the provider chain

use serde::Serialize;

use super::message::Turn;

/// Maximum number of prior turns forwarded to a provider.
pub const MAX_PRIOR_TURNS: usize = 4;

/// A provider-agnostic chat completion request.
///
/// Built per call and never persisted. `prior_turns` always holds at most
/// [`MAX_PRIOR_TURNS`] entries, the most recent ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    prior_turns: Vec<Turn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            prior_turns: Vec::new(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Attach conversation history, keeping only the last [`MAX_PRIOR_TURNS`].
    pub fn history(mut self, turns: &[Turn]) -> Self {
        let skip = turns.len().saturating_sub(MAX_PRIOR_TURNS);
        self.prior_turns = turns[skip..].to_vec();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn prior_turns(&self) -> &[Turn] {
        &self.prior_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_last_four_turns() {
        let turns: Vec<Turn> = (0..7).map(|i| Turn::user(format!("q{i}"))).collect();
        let request = CompletionRequest::new("sys", "user").history(&turns);
        let kept: Vec<_> = request
            .prior_turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(kept, ["q3", "q4", "q5", "q6"]);
    }

    #[test]
    fn short_history_is_kept_whole() {
        let turns = [Turn::user("hi"), Turn::assistant("hello")];
        let request = CompletionRequest::new("sys", "user").history(&turns);
        assert_eq!(request.prior_turns(), &turns);
    }

    #[test]
    fn builder_sets_sampling_params() {
        let request = CompletionRequest::new("s", "u").temperature(0.2).max_tokens(64);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 64);
    }
}
