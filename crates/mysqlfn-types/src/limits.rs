//! Resource limits applied by builtins that can allocate in proportion to an
//! argument value (REPEAT, SPACE, RPAD, LPAD).

/// MySQL's default `max_allowed_packet` (64 MiB).
pub const DEFAULT_MAX_ALLOWED_PACKET: u64 = 64 * 1024 * 1024;

/// Maximum fractional-second precision of TIME/DATETIME values.
pub const MAX_FSP: u8 = 6;

/// Per-session limits, normally populated from the engine's configuration
/// or session variables.
///
/// A result that would exceed `max_allowed_packet` bytes is returned as SQL
/// NULL rather than allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FunctionLimits {
    /// Largest string result, in bytes, a builtin may produce.
    pub max_allowed_packet: u64,
}

impl Default for FunctionLimits {
    fn default() -> Self {
        Self {
            max_allowed_packet: DEFAULT_MAX_ALLOWED_PACKET,
        }
    }
}

impl FunctionLimits {
    /// Whether a result of `len` bytes may be produced.
    pub const fn admits(&self, len: u64) -> bool {
        len <= self.max_allowed_packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_mysql() {
        assert_eq!(
            FunctionLimits::default().max_allowed_packet,
            67_108_864
        );
    }

    #[test]
    fn admits_boundary() {
        let limits = FunctionLimits {
            max_allowed_packet: 10,
        };
        assert!(limits.admits(10));
        assert!(!limits.admits(11));
    }

    #[test]
    fn deserialize_partial_config() {
        let limits: FunctionLimits = serde_json::from_str("{}").unwrap();
        assert_eq!(limits, FunctionLimits::default());

        let limits: FunctionLimits =
            serde_json::from_str(r#"{"max_allowed_packet": 1024}"#).unwrap();
        assert_eq!(limits.max_allowed_packet, 1024);
    }
}
