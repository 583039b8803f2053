//! The prospect save document and its JSON envelope.
//!
//! A save file is a pretty-printed UTF-8 JSON object with two top-level
//! keys: `ProspectInfo`, free-form session metadata this crate carries
//! but does not interpret, and `ProspectBlob`, the compressed and
//! hashed binary property stream. The decoded property list lives only
//! in memory; every [`ProspectSave::save`] call recomputes the whole
//! blob from it, so the two can never be persisted out of sync.

use crate::blob;
use crate::error::{ProspectError, ProspectResult};
use crate::property::{self, Property};
use crate::version::PROSPECT_PACKAGE_VERSION;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use tracing::{debug, warn};

/// Session metadata stored alongside the blob. Opaque to this crate
/// beyond its JSON shape; null-valued strings are omitted when written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProspectInfo {
    #[serde(rename = "ProspectID", skip_serializing_if = "Option::is_none")]
    pub prospect_id: Option<String>,
    #[serde(rename = "ClaimedAccountID", skip_serializing_if = "Option::is_none")]
    pub claimed_account_id: Option<String>,
    pub claimed_account_character: i32,
    #[serde(rename = "ProspectDTKey", skip_serializing_if = "Option::is_none")]
    pub prospect_dt_key: Option<String>,
    #[serde(rename = "FactionMissionDTKey", skip_serializing_if = "Option::is_none")]
    pub faction_mission_dt_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lobby_name: Option<String>,
    pub expire_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prospect_state: Option<String>,
    pub associated_members: Vec<AssociatedMember>,
    pub cost: i32,
    pub reward: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    pub insurance: bool,
    pub no_respawns: bool,
    pub elapsed_time: i32,
    pub selected_drop_point: i32,
}

/// One player associated with a prospect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AssociatedMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(rename = "UserID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub chr_slot: i32,
    pub experience: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub settled: bool,
    pub is_currently_playing: bool,
}

/// The compressed property payload and its bookkeeping fields.
///
/// Derived state: recomputed in full from the decoded property list on
/// every save. `key` is an opaque identifier passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProspectBlob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Lowercase hex SHA-1 of the uncompressed property stream.
    pub hash: String,
    pub total_length: u64,
    pub data_length: u64,
    pub uncompressed_length: u64,
    /// Standard padded base64 of the zlib-compressed property stream.
    pub binary_blob: String,
}

/// Whether `load` checks the stored blob hash against the decompressed
/// content. Save files in the wild were written without verification,
/// so a lenient mode is available for their readers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrityMode {
    /// Fail with [`ProspectError::IntegrityMismatch`] on a bad hash.
    #[default]
    Verify,
    /// Log the mismatch and load anyway.
    Warn,
    /// Do not check the hash.
    Skip,
}

/// Per-call options for [`ProspectSave::load_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub integrity: IntegrityMode,
}

/// An in-memory prospect save file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProspectSave {
    #[serde(rename = "ProspectInfo")]
    pub info: ProspectInfo,
    #[serde(rename = "ProspectBlob")]
    blob: ProspectBlob,
    /// Decoded form of `blob.binary_blob`; never serialized directly.
    #[serde(skip)]
    pub data: Vec<Property>,
}

impl ProspectSave {
    /// Creates an empty prospect with no properties and blank metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookkeeping fields of the current blob, as of the last save or
    /// load. Stale until the first `save` for a new prospect.
    pub fn blob(&self) -> &ProspectBlob {
        &self.blob
    }

    /// Loads a prospect from a JSON envelope, verifying the blob hash.
    pub fn load<R: Read>(reader: R) -> ProspectResult<Self> {
        Self::load_with(reader, LoadOptions::default())
    }

    /// Loads a prospect from a JSON envelope.
    pub fn load_with<R: Read>(reader: R, options: LoadOptions) -> ProspectResult<Self> {
        let mut save: ProspectSave = serde_json::from_reader(reader).map_err(|e| {
            ProspectError::MalformedEnvelope {
                stage: "parse json",
                detail: e.to_string(),
            }
        })?;
        let compressed = BASE64.decode(&save.blob.binary_blob).map_err(|e| {
            ProspectError::MalformedEnvelope {
                stage: "decode base64",
                detail: e.to_string(),
            }
        })?;
        let raw = blob::decompress(&compressed)?;
        if options.integrity != IntegrityMode::Skip {
            let actual = blob::digest(&raw);
            if !actual.eq_ignore_ascii_case(&save.blob.hash) {
                if options.integrity == IntegrityMode::Verify {
                    return Err(ProspectError::IntegrityMismatch {
                        expected: save.blob.hash.clone(),
                        actual,
                    });
                }
                warn!(
                    expected = %save.blob.hash,
                    actual = %actual,
                    "prospect blob hash mismatch"
                );
            }
        }
        save.data = property::read_properties(
            &mut raw.as_slice(),
            PROSPECT_PACKAGE_VERSION,
            false,
        )
        .map_err(|source| ProspectError::PropertyStream {
            stage: "decode prospect data",
            source,
        })?;
        debug!(
            properties = save.data.len(),
            uncompressed = raw.len(),
            "loaded prospect"
        );
        Ok(save)
    }

    /// Saves this prospect as a JSON envelope, recomputing the blob from
    /// the current property list.
    pub fn save<W: Write>(&mut self, writer: W) -> ProspectResult<()> {
        let mut raw = Vec::new();
        property::write_properties(&self.data, &mut raw, PROSPECT_PACKAGE_VERSION, false)
            .map_err(|source| ProspectError::PropertyStream {
                stage: "encode prospect data",
                source,
            })?;
        self.blob.uncompressed_length = raw.len() as u64;
        self.blob.hash = blob::digest(&raw);

        let compressed = blob::compress(&raw)?;
        self.blob.data_length = compressed.len() as u64;
        self.blob.total_length = compressed.len() as u64;
        self.blob.binary_blob = BASE64.encode(&compressed);
        debug!(
            properties = self.data.len(),
            uncompressed = raw.len(),
            compressed = compressed.len(),
            "encoded prospect blob"
        );

        serde_json::to_writer_pretty(writer, &*self).map_err(io::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/prospect_tests.rs"]
mod tests;
