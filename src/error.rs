use crate::property::PropertyStreamError;
use miette::Diagnostic;
use thiserror::Error;

pub type ProspectResult<T> = Result<T, ProspectError>;

/// Errors produced while saving or loading a prospect. Every failure is
/// terminal for the current call; no stage retries or recovers partially.
#[derive(Debug, Error, Diagnostic)]
pub enum ProspectError {
    #[error("malformed envelope ({stage}): {detail}")]
    #[diagnostic(code("prospect.malformed_envelope"))]
    MalformedEnvelope {
        stage: &'static str,
        detail: String,
    },
    #[error("corrupt blob: {0}")]
    #[diagnostic(code("prospect.corrupt_blob"))]
    CorruptBlob(String),
    #[error("blob hash mismatch: envelope declares {expected}, content is {actual}")]
    #[diagnostic(code("prospect.integrity_mismatch"))]
    IntegrityMismatch { expected: String, actual: String },
    #[error("property stream error ({stage}): {source}")]
    #[diagnostic(code("prospect.property_stream"))]
    PropertyStream {
        stage: &'static str,
        #[source]
        source: PropertyStreamError,
    },
    #[error("invalid recorder carrier: expected a byte array property, found {0}")]
    #[diagnostic(code("prospect.invalid_carrier"))]
    InvalidCarrier(&'static str),
    #[error("i/o error: {0}")]
    #[diagnostic(code("prospect.io"))]
    Io(#[from] std::io::Error),
}
