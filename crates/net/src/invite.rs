//! Team invite codes
//!
//! A code is exactly six ASCII letters or digits, stored uppercase. Input is
//! accepted in any case and with surrounding whitespace.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use hackos_core::validation::INVITE_CODE_LEN;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    /// Normalize and check user input
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim();
        if code.len() != INVITE_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::MalformedInviteCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Random code for a freshly created team
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..INVITE_CODE_LEN)
            .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InviteCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InviteCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let code = InviteCode::parse("  xk42pq ").unwrap();
        assert_eq!(code.as_str(), "XK42PQ");
        assert_eq!(code.to_string(), "XK42PQ");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(InviteCode::parse("").is_err());
        assert!(InviteCode::parse("ABC12").is_err());
        assert!(InviteCode::parse("ABC1234").is_err());
        assert!(InviteCode::parse("AB-123").is_err());
        assert_eq!(
            InviteCode::parse("abc").unwrap_err(),
            Error::MalformedInviteCode("abc".to_string())
        );
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..50 {
            let code = InviteCode::generate();
            assert_eq!(code.as_str().len(), INVITE_CODE_LEN);
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            assert_eq!(InviteCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn test_parse_agrees_with_join_form_validation() {
        use hackos_core::validation::{validate_join_team, JoinTeamForm};

        for input in ["xk42pq", " ABC123 ", "abc", "ABC1234", "AB-123"] {
            let form = JoinTeamForm {
                user_name: "Jordan Kim".to_string(),
                invite_code: input.to_string(),
            };
            assert_eq!(
                InviteCode::parse(input).is_ok(),
                validate_join_team(&form).is_ok(),
                "disagreement on {input:?}"
            );
        }
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let code: InviteCode = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(code.as_str(), "ABC123");
        assert!(serde_json::from_str::<InviteCode>("\"nope\"").is_err());
    }
}
