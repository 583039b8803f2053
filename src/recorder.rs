//! Embedding one property stream inside a single property of another.
//!
//! Recorder components keep their state as an independent property
//! list, flattened into the byte-array value of a `BinaryData` property
//! in the outer schema. Unlike the top-level envelope, the embedded
//! stream carries its own terminator: to its parent it is opaque bytes,
//! so it needs a self-describing end marker.

use crate::error::{ProspectError, ProspectResult};
use crate::property::{self, Property, PropertyValue};
use crate::version::PROSPECT_PACKAGE_VERSION;

/// Name of the carrier property holding flattened recorder state.
pub const RECORDER_DATA_NAME: &str = "BinaryData";

/// Flattens `properties` into a byte-array property named
/// [`RECORDER_DATA_NAME`].
pub fn serialize_recorder_data(properties: &[Property]) -> ProspectResult<Property> {
    let mut bytes = Vec::new();
    property::write_properties(properties, &mut bytes, PROSPECT_PACKAGE_VERSION, true).map_err(
        |source| ProspectError::PropertyStream {
            stage: "encode recorder data",
            source,
        },
    )?;
    Ok(Property::bytes(RECORDER_DATA_NAME, bytes))
}

/// Recovers the property list flattened into `carrier` by
/// [`serialize_recorder_data`].
///
/// The carrier must be a byte-array property; anything else is a caller
/// error reported as [`ProspectError::InvalidCarrier`].
pub fn deserialize_recorder_data(carrier: &Property) -> ProspectResult<Vec<Property>> {
    let bytes = match &carrier.value {
        PropertyValue::Bytes(bytes) => bytes,
        other => return Err(ProspectError::InvalidCarrier(other.kind())),
    };
    property::read_properties(&mut bytes.as_slice(), PROSPECT_PACKAGE_VERSION, true).map_err(
        |source| ProspectError::PropertyStream {
            stage: "decode recorder data",
            source,
        },
    )
}

#[cfg(test)]
#[path = "tests/recorder_tests.rs"]
mod tests;
