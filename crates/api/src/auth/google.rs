//! Google ID-token verification, treated as an opaque external call.
//!
//! The trait seam keeps handlers testable without Google; the production
//! implementation asks Google's tokeninfo endpoint to validate the token
//! and hand back the profile claims.

use async_trait::async_trait;
use linkdock_db::models::user::GoogleProfile;
use serde::Deserialize;

/// Verifies a Google ID token and extracts the profile it asserts.
///
/// `Ok(None)` means the token was rejected (invalid or expired);
/// `Err` means verification itself could not be performed.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<Option<GoogleProfile>, reqwest::Error>;
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Claims subset returned by the tokeninfo endpoint.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

/// Production verifier backed by Google's tokeninfo endpoint.
pub struct HttpGoogleVerifier {
    client: reqwest::Client,
}

impl HttpGoogleVerifier {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
        })
    }
}

#[async_trait]
impl GoogleTokenVerifier for HttpGoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<Option<GoogleProfile>, reqwest::Error> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        // Tokeninfo answers 4xx for invalid tokens; that is a rejection,
        // not a verification failure.
        if !response.status().is_success() {
            return Ok(None);
        }

        let info: TokenInfo = response.json().await?;
        Ok(Some(GoogleProfile {
            id: info.sub,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }))
    }
}
