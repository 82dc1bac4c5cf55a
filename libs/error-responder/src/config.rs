//! Responder configuration.

use serde::{Deserialize, Serialize};

/// Default prefix of every problem type URI.
pub const DEFAULT_TYPE_PREFIX: &str = "/errors";

/// Error responder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponderConfig {
    /// Prefix for problem type URIs, e.g. `/errors` or `https://errors.example.com`.
    pub type_prefix: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            type_prefix: DEFAULT_TYPE_PREFIX.to_owned(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: ResponderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ResponderConfig::default());
        assert_eq!(cfg.type_prefix, "/errors");
    }

    #[test]
    fn prefix_can_be_overridden() {
        let cfg: ResponderConfig =
            serde_json::from_str(r#"{"type_prefix":"https://errors.example.com"}"#).unwrap();
        assert_eq!(cfg.type_prefix, "https://errors.example.com");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_str::<ResponderConfig>(r#"{"type_prefx":"/e"}"#);
        assert!(res.is_err());
    }
}
