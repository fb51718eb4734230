//! Wire types for the Exact Online REST and OAuth endpoints.

use serde::Deserialize;

/// Body of a successful `POST /api/oauth2/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Present when the platform rotates the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth error body (`{"error": "invalid_grant", ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthErrorBody {
    /// Human-readable reason, preferring the description.
    pub fn reason(&self) -> Option<&str> {
        self.error_description.as_deref().or(self.error.as_deref())
    }
}

/// OData v2 envelope: `{"d": {"results": [...]}}`, or `{"d": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataEnvelope<T> {
    pub d: ODataPayload<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ODataPayload<T> {
    Results { results: Vec<T> },
    List(Vec<T>),
}

impl<T> ODataEnvelope<T> {
    pub fn into_results(self) -> Vec<T> {
        match self.d {
            ODataPayload::Results { results } => results,
            ODataPayload::List(items) => items,
        }
    }
}

/// Projection of `crm/Accounts` selected with `$select=ID`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "ID")]
    pub id: String,
}
