//! Array-of-bytes pattern validation
//!
//! Patterns are validated locally before transmission so a malformed
//! pattern never reaches the remote scanner.

use crate::core::types::{BridgeError, BridgeResult};

/// A validated AOB pattern: hex byte tokens with `??` wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AobPattern {
    tokens: Vec<Option<u8>>,
}

impl AobPattern {
    /// Parses a pattern like `48 8B ?? ?? 89`.
    pub fn parse(pattern: &str) -> BridgeResult<Self> {
        if pattern.trim().is_empty() {
            return Err(BridgeError::InvalidPattern("empty pattern".to_string()));
        }

        let mut tokens = Vec::new();
        for part in pattern.split_whitespace() {
            if part == "??" || part == "?" {
                tokens.push(None);
            } else {
                if part.len() != 2 {
                    return Err(BridgeError::InvalidPattern(format!(
                        "hex byte '{}' must be 2 digits",
                        part
                    )));
                }
                let byte = u8::from_str_radix(part, 16).map_err(|_| {
                    BridgeError::InvalidPattern(format!("invalid hex byte '{}'", part))
                })?;
                tokens.push(Some(byte));
            }
        }

        if tokens.iter().all(Option::is_none) {
            return Err(BridgeError::InvalidPattern(
                "pattern must contain at least one concrete byte".to_string(),
            ));
        }

        Ok(AobPattern { tokens })
    }

    /// Pattern length in bytes
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the pattern is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The normalized wire form: uppercase hex tokens, `??` wildcards,
    /// single-space separated.
    pub fn wire_form(&self) -> String {
        self.tokens
            .iter()
            .map(|t| match t {
                Some(b) => format!("{:02X}", b),
                None => "??".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pattern() {
        let p = AobPattern::parse("48 8b ?? ? 90").unwrap();
        assert_eq!(p.len(), 5);
        assert_eq!(p.wire_form(), "48 8B ?? ?? 90");
    }

    #[test]
    fn test_reject_empty() {
        assert!(AobPattern::parse("").is_err());
        assert!(AobPattern::parse("   ").is_err());
    }

    #[test]
    fn test_reject_malformed_tokens() {
        assert!(AobPattern::parse("48 8").is_err());
        assert!(AobPattern::parse("XYZ").is_err());
        assert!(AobPattern::parse("48 8B9").is_err());
    }

    #[test]
    fn test_reject_all_wildcards() {
        assert!(AobPattern::parse("?? ?? ??").is_err());
    }
}
