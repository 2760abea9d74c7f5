//! Decoder for the WebAssembly 1.0 binary format.
//!
//! [`decode`] consumes a raw module image and produces an immutable
//! [`module::Module`]: the ordered section list with types, imports,
//! function bodies and segments fully parsed, and every index left
//! numeric for later resolution.

pub mod error;
pub mod module;
pub mod stream;

pub use error::{DecodeError, ReadError};
pub use module::{decode, Module};
