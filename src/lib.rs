//! Reader and writer for prospect save files.
//!
//! A prospect save is a JSON envelope: free-form session metadata next
//! to a binary property stream that has been compressed with zlib,
//! fingerprinted with SHA-1, and base64-encoded. This crate round-trips
//! that envelope and the secondary "recorder data" encoding that embeds
//! one property stream inside a single property of another.
//!
//! ```no_run
//! use prospect_save::{Property, ProspectSave};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut prospect = ProspectSave::load(File::open("prospect.json")?)?;
//! prospect.data.push(Property::int("ElapsedTime", 1200));
//! prospect.save(File::create("prospect.json")?)?;
//! # Ok(())
//! # }
//! ```

mod blob;
mod error;
mod property;
mod prospect;
mod recorder;
mod version;

pub use blob::{compress, decompress, digest};
pub use error::{ProspectError, ProspectResult};
pub use property::{
    read_properties, write_properties, Property, PropertyStreamError, PropertyValue,
};
pub use prospect::{
    AssociatedMember, IntegrityMode, LoadOptions, ProspectBlob, ProspectInfo, ProspectSave,
};
pub use recorder::{deserialize_recorder_data, serialize_recorder_data, RECORDER_DATA_NAME};
pub use version::{PackageVersion, PROSPECT_PACKAGE_VERSION};
