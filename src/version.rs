//! Format versioning constants for prospect saves.
//!
//! The package version selects the binary framing rules the property
//! codec applies. It is fixed per save-format revision and passed
//! unchanged on every encode/decode call, never derived from input data.

use serde::{Deserialize, Serialize};

/// Version token for a property stream: an engine-major revision plus a
/// minor-era marker. Opaque outside the property codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVersion {
    pub major: u16,
    pub era: u16,
}

impl PackageVersion {
    pub const fn new(major: u16, era: u16) -> Self {
        Self { major, era }
    }
}

/// Package version written and expected by the current prospect format.
/// Increment only together with a save-format revision.
pub const PROSPECT_PACKAGE_VERSION: PackageVersion = PackageVersion::new(4, 27);
