use std::io;

use thiserror::Error;

/// Everything that can go wrong while decoding a module.
///
/// The first failure aborts the enclosing decode; no error is recovered
/// locally. `UnexpectedEof` is kept distinct from the content errors so
/// callers can tell a truncated stream from a malformed one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("stream ended in the middle of a value")]
    UnexpectedEof,
    #[error("expected an index")]
    ExpectedIndex,
    #[error("expected a kind tag")]
    ExpectedKindTag,
    #[error("expected a size prefix")]
    ExpectedSize,
    #[error("expected an instruction or a terminator")]
    ExpectedValueOrTerminator,
    #[error("index outside the representable range")]
    InvalidIndex,
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("module does not start with the \\0asm magic bytes (got {0:02x?})")]
    InvalidModuleMagic([u8; 4]),
    #[error("unsupported module version {0}")]
    InvalidModuleVersion(u32),
    #[error("size prefix disagrees with content: {0} bytes left unread")]
    InvalidSize(usize),
    #[error("unrecognized tag byte {0:#04x}")]
    InvalidTag(u8),
    #[error("unrecognized value type byte {0:#04x}")]
    InvalidType(u8),
    #[error("vector length {0} exceeds the remaining input")]
    HugeAllocationRequested(u32),
    #[error("unsupported encoding: {0}")]
    NotImplemented(&'static str),
}

impl DecodeError {
    /// Replaces a failure with the kind the caller was expecting, keeping
    /// truncation distinct: end-of-stream stays `UnexpectedEof`.
    pub(crate) fn expected(self, kind: DecodeError) -> DecodeError {
        match self {
            DecodeError::UnexpectedEof => DecodeError::UnexpectedEof,
            _ => kind,
        }
    }
}

/// Failure of the filesystem convenience loader.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read module: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
