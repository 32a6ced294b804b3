pub mod commands;
pub mod inventory;
pub mod session;
pub mod table;

pub use crate::domain::model::{Decoded, Part, PartInput};
pub use crate::domain::ports::{PartCodec, Prompt, Storage};
pub use crate::utils::error::Result;
