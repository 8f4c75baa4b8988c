//! Built-in provider chain.
//!
//! Ordered strongest/most reliable first, most available last: six
//! OpenRouter free-tier models, two Groq models, then OpenAI direct as the
//! paid last resort.

/// OpenRouter OpenAI-compatible base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Groq OpenAI-compatible base URL.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// OpenAI base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// One entry of the built-in chain: `(name, base_url, model, api_key_env)`.
pub type DefaultEntry = (&'static str, &'static str, &'static str, &'static str);

/// The built-in chain in priority order.
pub const DEFAULT_CHAIN: &[DefaultEntry] = &[
    (
        "openrouter-llama-3.3-70b",
        OPENROUTER_BASE_URL,
        "meta-llama/llama-3.3-70b-instruct:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "openrouter-deepseek-v3",
        OPENROUTER_BASE_URL,
        "deepseek/deepseek-chat-v3-0324:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "openrouter-gemini-flash",
        OPENROUTER_BASE_URL,
        "google/gemini-2.0-flash-exp:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "openrouter-qwen-2.5-72b",
        OPENROUTER_BASE_URL,
        "qwen/qwen-2.5-72b-instruct:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "openrouter-mistral-7b",
        OPENROUTER_BASE_URL,
        "mistralai/mistral-7b-instruct:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "openrouter-phi-3-medium",
        OPENROUTER_BASE_URL,
        "microsoft/phi-3-medium-128k-instruct:free",
        "OPENROUTER_API_KEY",
    ),
    (
        "groq-llama-3.3-70b",
        GROQ_BASE_URL,
        "llama-3.3-70b-versatile",
        "GROQ_API_KEY",
    ),
    (
        "groq-mixtral-8x7b",
        GROQ_BASE_URL,
        "mixtral-8x7b-32768",
        "GROQ_API_KEY",
    ),
    ("openai-gpt-4o-mini", OPENAI_BASE_URL, "gpt-4o-mini", "OPENAI_API_KEY"),
];
