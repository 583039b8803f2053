//! Typed property model and binary property-stream codec.
//!
//! A property stream is an ordered sequence of tagged, named, typed
//! values. The rest of the crate treats this module as a collaborator
//! and only calls [`read_properties`] and [`write_properties`], passing
//! the fixed [`PackageVersion`] for the current save-format revision.
//!
//! Wire layout is little-endian: one tag byte per property, a
//! length-prefixed UTF-8 name, then a per-type payload. Streams may end
//! with a `0x00` sentinel; whether one is present is decided by the
//! container, not the stream itself (an embedded stream is opaque bytes
//! to its parent and needs a self-describing end marker, while a
//! top-level stream's extent is already known from its container).

use crate::version::PackageVersion;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Stream framing revision this codec understands.
const SUPPORTED_MAJOR: u16 = 4;

const TAG_END: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_FLOAT: u8 = 0x03;
const TAG_STR: u8 = 0x04;
const TAG_BYTES: u8 = 0x05;

/// A single named, typed value in a property stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// The closed set of value types a property can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, PropertyValue::Int(value))
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::Str(value.into()))
    }

    pub fn bytes(name: impl Into<String>, value: Vec<u8>) -> Self {
        Self::new(name, PropertyValue::Bytes(value))
    }
}

impl PropertyValue {
    /// Type name of this value, in the save format's naming scheme.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "BoolProperty",
            PropertyValue::Int(_) => "IntProperty",
            PropertyValue::Float(_) => "FloatProperty",
            PropertyValue::Str(_) => "StrProperty",
            PropertyValue::Bytes(_) => "ArrayProperty",
        }
    }
}

/// Errors raised by the property-stream codec.
#[derive(Debug, Error)]
pub enum PropertyStreamError {
    #[error("i/o error reading or writing property stream: {0}")]
    Io(#[source] io::Error),
    #[error("unsupported property stream version: major {0}")]
    UnsupportedVersion(u16),
    #[error("unexpected property tag 0x{0:02x}")]
    UnexpectedTag(u8),
    #[error("property stream contains invalid UTF-8")]
    InvalidUtf8,
    #[error("property stream ended before its terminator")]
    MissingTerminator,
    #[error("property stream truncated mid-value")]
    Truncated,
    #[error("value length exceeds format limit")]
    Oversize,
}

/// Reads an ordered property list from `reader`.
///
/// With `include_terminator` the stream must end with the sentinel tag;
/// reaching end of input first is an error. Without it, reading simply
/// stops at end of input, and a sentinel tag is malformed.
pub fn read_properties<R: Read>(
    reader: &mut R,
    version: PackageVersion,
    include_terminator: bool,
) -> Result<Vec<Property>, PropertyStreamError> {
    ensure_supported(version)?;
    let mut properties = Vec::new();
    loop {
        let tag = match read_tag(reader)? {
            Some(tag) => tag,
            None if include_terminator => return Err(PropertyStreamError::MissingTerminator),
            None => return Ok(properties),
        };
        if tag == TAG_END {
            if include_terminator {
                return Ok(properties);
            }
            return Err(PropertyStreamError::UnexpectedTag(TAG_END));
        }
        properties.push(read_property(reader, tag)?);
    }
}

/// Writes `properties` to `writer` in order, appending the sentinel tag
/// when `include_terminator` is set.
pub fn write_properties<W: Write>(
    properties: &[Property],
    writer: &mut W,
    version: PackageVersion,
    include_terminator: bool,
) -> Result<(), PropertyStreamError> {
    ensure_supported(version)?;
    for property in properties {
        write_property(property, writer)?;
    }
    if include_terminator {
        writer
            .write_all(&[TAG_END])
            .map_err(PropertyStreamError::Io)?;
    }
    Ok(())
}

fn ensure_supported(version: PackageVersion) -> Result<(), PropertyStreamError> {
    if version.major != SUPPORTED_MAJOR {
        return Err(PropertyStreamError::UnsupportedVersion(version.major));
    }
    Ok(())
}

fn read_property<R: Read>(reader: &mut R, tag: u8) -> Result<Property, PropertyStreamError> {
    let name = read_string(reader)?;
    let value = match tag {
        TAG_BOOL => {
            let mut byte = [0u8; 1];
            fill(reader, &mut byte)?;
            PropertyValue::Bool(byte[0] != 0)
        }
        TAG_INT => {
            let mut bytes = [0u8; 8];
            fill(reader, &mut bytes)?;
            PropertyValue::Int(i64::from_le_bytes(bytes))
        }
        TAG_FLOAT => {
            let mut bytes = [0u8; 8];
            fill(reader, &mut bytes)?;
            PropertyValue::Float(f64::from_le_bytes(bytes))
        }
        TAG_STR => PropertyValue::Str(read_string(reader)?),
        TAG_BYTES => {
            let len = read_u32(reader)?;
            PropertyValue::Bytes(read_buf(reader, len)?)
        }
        other => return Err(PropertyStreamError::UnexpectedTag(other)),
    };
    Ok(Property { name, value })
}

fn write_property<W: Write>(
    property: &Property,
    writer: &mut W,
) -> Result<(), PropertyStreamError> {
    let tag = match property.value {
        PropertyValue::Bool(_) => TAG_BOOL,
        PropertyValue::Int(_) => TAG_INT,
        PropertyValue::Float(_) => TAG_FLOAT,
        PropertyValue::Str(_) => TAG_STR,
        PropertyValue::Bytes(_) => TAG_BYTES,
    };
    put(writer, &[tag])?;
    write_string(writer, &property.name)?;
    match &property.value {
        PropertyValue::Bool(value) => put(writer, &[u8::from(*value)]),
        PropertyValue::Int(value) => put(writer, &value.to_le_bytes()),
        PropertyValue::Float(value) => put(writer, &value.to_le_bytes()),
        PropertyValue::Str(value) => write_string(writer, value),
        PropertyValue::Bytes(value) => {
            write_len(writer, value.len())?;
            put(writer, value)
        }
    }
}

/// Reads one tag byte, or `None` at end of input.
fn read_tag<R: Read>(reader: &mut R) -> Result<Option<u8>, PropertyStreamError> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PropertyStreamError::Io(e)),
        }
    }
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, PropertyStreamError> {
    let len = read_u32(reader)?;
    let bytes = read_buf(reader, len)?;
    String::from_utf8(bytes).map_err(|_| PropertyStreamError::InvalidUtf8)
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), PropertyStreamError> {
    write_len(writer, value.len())?;
    put(writer, value.as_bytes())
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, PropertyStreamError> {
    let mut bytes = [0u8; 4];
    fill(reader, &mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> Result<(), PropertyStreamError> {
    let len = u32::try_from(len).map_err(|_| PropertyStreamError::Oversize)?;
    put(writer, &len.to_le_bytes())
}

/// Reads exactly `len` bytes without trusting `len` for preallocation.
fn read_buf<R: Read>(reader: &mut R, len: u32) -> Result<Vec<u8>, PropertyStreamError> {
    let mut buf = Vec::new();
    reader
        .by_ref()
        .take(u64::from(len))
        .read_to_end(&mut buf)
        .map_err(PropertyStreamError::Io)?;
    if buf.len() != len as usize {
        return Err(PropertyStreamError::Truncated);
    }
    Ok(buf)
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), PropertyStreamError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PropertyStreamError::Truncated,
        _ => PropertyStreamError::Io(e),
    })
}

fn put<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), PropertyStreamError> {
    writer.write_all(bytes).map_err(PropertyStreamError::Io)
}

#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod tests;
