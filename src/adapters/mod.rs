// Adapters layer: concrete implementations of the domain ports (file storage, terminal prompt).

pub mod storage;
pub mod terminal;

pub use storage::LocalStorage;
pub use terminal::TerminalPrompt;
