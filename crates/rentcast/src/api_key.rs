//! RentCast API credential.

use crate::{Error, Result};

/// Length of a RentCast API key, in hex characters.
pub const API_KEY_LEN: usize = 32;

/// A validated RentCast API key.
///
/// Formatting never prints more than the last four characters.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a raw key: 32 ASCII hex digits, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        if key.len() != API_KEY_LEN || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidApiKey);
        }
        Ok(Self(key.to_string()))
    }

    /// Validate an optional key, treating `None` as missing.
    pub fn from_option(raw: Option<&str>) -> Result<Self> {
        raw.map_or(Err(Error::MissingApiKey), Self::parse)
    }

    /// The raw key, for the request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tail = &self.0[self.0.len() - 4..];
        write!(f, "****{tail}")
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123456789ABCDEF";

    #[test]
    fn accepts_hex_key() {
        let key = ApiKey::parse(KEY).unwrap();
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn trims_whitespace() {
        let key = ApiKey::parse(&format!("  {KEY}\n")).unwrap();
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(ApiKey::parse("abc123"), Err(Error::InvalidApiKey)));
        assert!(matches!(
            ApiKey::parse(&format!("{KEY}0")),
            Err(Error::InvalidApiKey)
        ));
    }

    #[test]
    fn rejects_non_hex() {
        let key = "0123456789abcdef0123456789abcdeg";
        assert!(matches!(ApiKey::parse(key), Err(Error::InvalidApiKey)));
    }

    #[test]
    fn empty_or_absent_is_missing() {
        assert!(matches!(ApiKey::parse("   "), Err(Error::MissingApiKey)));
        assert!(matches!(ApiKey::from_option(None), Err(Error::MissingApiKey)));
    }

    #[test]
    fn formatting_redacts() {
        let key = ApiKey::parse(KEY).unwrap();
        assert_eq!(key.to_string(), "****CDEF");
        assert_eq!(format!("{key:?}"), "ApiKey(****CDEF)");
    }
}
