//! Encoding of the editor state into a URL-fragment-safe string.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::TreeConfig;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedState {
    pub input: String,
    #[serde(default)]
    pub config: TreeConfig,
}

impl SharedState {
    pub fn new(input: impl Into<String>, config: TreeConfig) -> Self {
        Self {
            input: input.into(),
            config,
        }
    }

    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    pub fn to_fragment(&self) -> Result<String> {
        Ok(format!("#{}", self.encode()?))
    }

    /// Decode an encoded state; a leading `#` is accepted.
    pub fn decode(encoded: &str) -> Result<Self> {
        let encoded = encoded.trim();
        let encoded = encoded.strip_prefix('#').unwrap_or(encoded);
        let json = URL_SAFE_NO_PAD.decode(encoded)?;
        Ok(serde_json::from_slice(&json)?)
    }
}
