//! `appsecret_proof` generation.
//!
//! Servers configured with "Require App Secret" reject any call that
//! carries a bare access token. The proof is an HMAC-SHA256 of the
//! token keyed by the app secret, hex-encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{GraphError, GraphResult};

/// Compute the `appsecret_proof` value for an access token.
pub fn appsecret_proof(app_secret: &str, access_token: &str) -> GraphResult<String> {
    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| GraphError::Config(format!("Invalid app secret: {e}")))?;

    mac.update(access_token.as_bytes());
    let result = mac.finalize();
    Ok(result
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect())
}
