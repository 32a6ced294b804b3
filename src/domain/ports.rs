use crate::domain::model::{Decoded, Part};
use crate::utils::error::Result;
use std::path::Path;

/// Load/save capability for one file format.
pub trait PartCodec: Send + Sync {
    /// Lowercase extension without the leading dot.
    fn extension(&self) -> &'static str;

    fn can_load(&self) -> bool {
        true
    }

    fn decode(&self, data: &[u8]) -> Result<Decoded>;

    fn encode(&self, parts: &[Part]) -> Result<Vec<u8>>;
}

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// User interaction used by the session. `ask` returns the default for an
/// empty answer (an empty string when there is none) and `None` only at end
/// of input.
pub trait Prompt {
    fn next_command(&mut self) -> Result<Option<String>>;
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<Option<String>>;
    fn show(&mut self, message: &str) -> Result<()>;
    fn show_error(&mut self, message: &str) -> Result<()>;
}
