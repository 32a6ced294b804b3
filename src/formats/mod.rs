// One codec per on-disk format, the extension registry, and the store that
// ties them to file storage.

pub mod csv_format;
pub mod json_format;
pub mod pdf_format;
pub mod registry;
pub mod store;
pub mod txt_format;

pub use csv_format::CsvCodec;
pub use json_format::JsonCodec;
pub use pdf_format::{PdfCodec, PdfLayout};
pub use registry::{file_extension, FormatRegistry};
pub use store::{FormatStore, SaveReport};
pub use txt_format::TxtCodec;
