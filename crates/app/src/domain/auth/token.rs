//! API token formatting, parsing, and digest construction.
//!
//! Tokens look like `hc_v1_<token uuid, simple form>.<64 hex chars of secret>`.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::{auth::models::ApiTokenUuid, users::UserUuid};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "hc";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: ApiTokenUuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(
    token_uuid: ApiTokenUuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a raw bearer token into its parts.
///
/// # Errors
///
/// Returns an error when the token is not in the expected shape.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid = token_uuid_segment
        .parse::<ApiTokenUuid>()
        .or(Err(ApiTokenError::InvalidFormat))?;

    let secret = decode_secret_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret: ApiTokenSecret::from_bytes(secret),
    })
}

/// Digest stored in place of the token.
///
/// Hashes `{token_uuid_hex}:{version}:{user_uuid_hex}:{secret_hex}`, binding the
/// secret to the token and user it was issued for.
#[must_use]
pub fn token_digest(
    token_uuid: ApiTokenUuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> String {
    let mut input = format!(
        "{}:{}:{}:{}",
        token_uuid.into_uuid().simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes()),
    );

    let digest = encode_hex(&Sha256::digest(input.as_bytes()));

    input.zeroize();

    digest
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut encoded, byte| {
            let _infallible = write!(encoded, "{byte:02x}");
            encoded
        })
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; API_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn parse_and_format_round_trip() -> TestResult {
        let token_uuid = ApiTokenUuid::new();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);
        let parsed = parse_api_token(&token)?;

        assert!(token.starts_with("hc_v1_"), "unexpected token shape: {token}");
        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let token = format!("hc_v1_{}.abcd", Uuid::nil().simple());

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("hc_v9_{}.{}", Uuid::nil().simple(), "00".repeat(32));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn digest_is_deterministic_and_bound_to_user() {
        let token_uuid = ApiTokenUuid::new();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);
        let user = UserUuid::new();

        let first = token_digest(token_uuid, ApiTokenVersion::V1, user, &secret);
        let second = token_digest(token_uuid, ApiTokenVersion::V1, user, &secret);
        let other_user = token_digest(token_uuid, ApiTokenVersion::V1, UserUuid::new(), &secret);

        assert_eq!(first, second, "digest must be deterministic");
        assert_eq!(first.len(), 64);
        assert_ne!(first, other_user, "digest must depend on the user");
    }
}
