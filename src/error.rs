//! Error types for the Tunny library.

use thiserror::Error;

/// Errors produced by the Tunny library.
///
/// All conditions are detected eagerly at the boundary: seed validation and
/// wheel construction fail before any machine exists, and symbol validation
/// runs before the first keystream symbol is drawn. A message either
/// transforms completely or the operation fails without producing output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TunnyError {
    /// Seed is empty or failed format validation.
    #[error("Seed must be a non-empty byte sequence")]
    InvalidSeed,
    /// Wheel configuration is invalid (zero-length cam or a period
    /// duplicated within a role).
    ///
    /// Indicates a programming error in the wheel constants or in a
    /// caller-supplied wheel bank; unreachable from the built-in periods.
    #[error("Invalid wheel configuration: {reason}")]
    WheelConfig {
        /// Description of the offending period or pattern.
        reason: String,
    },
    /// Input symbol falls outside the 5-bit range [0, 31].
    #[error("Symbol {0} is outside the 5-bit range [0, 31]")]
    SymbolOutOfRange(u8),
    /// Character has no ITA2 code point in either shift.
    #[error("Character {0:?} cannot be encoded in ITA2")]
    Encoding(char),
}
