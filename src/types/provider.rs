//! Provider identity

use serde::{Deserialize, Serialize};

/// Where and how to reach an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}

/// One backend attempt in the fallback chain.
///
/// Immutable once built. A missing API key is not rejected here; the call
/// fails at request time and the chain moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    pub endpoint: EndpointConfig,
    pub model_id: String,
}

impl ProviderSpec {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: EndpointConfig {
                base_url: base_url.into(),
                api_key: api_key.into(),
            },
            model_id: model_id.into(),
        }
    }
}
