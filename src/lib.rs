pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod formats;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, TerminalPrompt};
pub use config::ShopConfig;
pub use crate::core::{commands::Action, inventory::Inventory, session::Session};
pub use domain::model::{Decoded, Part, PartInput};
pub use formats::{FormatRegistry, FormatStore, PdfLayout};
pub use utils::error::{Result, ShopError};
