//! Error types.
//!
//! Nothing on the per-tick path can fail: absent buttons, unknown device
//! names and duplicate probes are all handled in-band. Errors only surface
//! at setup time (configuration, slot/player ids) and when converting
//! untyped input (strings, raw integers) into logical identifiers.

use std::path::PathBuf;

/// Setup-time configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A slot or player id outside `1..=MAX_SLOTS`.
    #[error("invalid slot {0}, expected a value in 1..={}", crate::device::MAX_SLOTS)]
    InvalidSlot(u32),

    /// Deadzone must lie in `[0.0, 1.0)`.
    #[error("invalid deadzone {0}, expected a value in [0.0, 1.0)")]
    InvalidDeadzone(f32),

    /// Probe timeout of zero ticks would never let a device classify.
    #[error("probe timeout must be at least one tick")]
    ZeroProbeTimeout,

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conversion of untyped data into a logical identifier failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("unknown logical button {0:?}")]
    UnknownButton(String),

    #[error("unknown logical axis {0:?}")]
    UnknownAxis(String),

    #[error("logical button index {0} out of range")]
    ButtonOutOfRange(u8),

    #[error("logical axis index {0} out of range")]
    AxisOutOfRange(u8),
}
