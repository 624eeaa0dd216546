// src/utils/token.rs

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Wraps a normalized activation code in an opaque session token.
///
/// The token is a plain reversible carrier so the submit step knows which
/// code to redeem; it is deliberately not a security credential and callers
/// depend on it staying decodable.
pub fn encode_session_token(code: &str) -> String {
    URL_SAFE_NO_PAD.encode(code.as_bytes())
}

/// Recovers the code string from a session token.
/// Returns `None` for tokens that are not valid base64 or not UTF-8.
pub fn decode_session_token(token: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    String::from_utf8(bytes).ok()
}
