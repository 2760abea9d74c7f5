mod bin;
mod repr;

use std::fs;
use std::path::Path;

pub use bin::decode;
pub use repr::*;

use crate::error::ReadError;

impl Module {
    /// Loads and decodes a module image from disk.
    pub fn read(path: &Path) -> Result<Module, ReadError> {
        let bytes = fs::read(path)?;
        Ok(decode(&bytes)?)
    }
}
