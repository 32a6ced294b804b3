use crate::domain::ports::PartCodec;
use crate::formats::{CsvCodec, JsonCodec, PdfCodec, PdfLayout, TxtCodec};
use crate::utils::error::{Result, ShopError};
use std::path::Path;

/// Maps a lowercase file extension to the codec handling it. Adding a
/// format means registering one more codec.
pub struct FormatRegistry {
    codecs: Vec<Box<dyn PartCodec>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self { codecs: Vec::new() }
    }

    /// csv, txt and json for load and save, pdf for save only.
    pub fn standard(layout: PdfLayout) -> Self {
        let mut registry = Self::empty();
        registry.register(CsvCodec);
        registry.register(TxtCodec);
        registry.register(JsonCodec);
        registry.register(PdfCodec::new(layout));
        registry
    }

    /// Registers a codec, replacing any existing codec for the same extension.
    pub fn register<C: PartCodec + 'static>(&mut self, codec: C) {
        self.codecs.retain(|c| c.extension() != codec.extension());
        self.codecs.push(Box::new(codec));
    }

    pub fn get(&self, extension: &str) -> Option<&dyn PartCodec> {
        self.codecs
            .iter()
            .find(|c| c.extension().eq_ignore_ascii_case(extension))
            .map(|c| c.as_ref())
    }

    pub fn loader_for(&self, path: &Path) -> Result<&dyn PartCodec> {
        let codec = self.codec_for(path)?;
        if !codec.can_load() {
            return Err(ShopError::LoadNotSupported {
                extension: codec.extension().to_string(),
            });
        }
        Ok(codec)
    }

    pub fn saver_for(&self, path: &Path) -> Result<&dyn PartCodec> {
        self.codec_for(path)
    }

    pub fn load_extensions(&self) -> Vec<&'static str> {
        self.codecs
            .iter()
            .filter(|c| c.can_load())
            .map(|c| c.extension())
            .collect()
    }

    pub fn save_extensions(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|c| c.extension()).collect()
    }

    fn codec_for(&self, path: &Path) -> Result<&dyn PartCodec> {
        let extension = file_extension(path).unwrap_or_default();
        self.get(&extension).ok_or_else(|| ShopError::UnsupportedFormat {
            extension,
            supported: self.save_extensions().join(", "),
        })
    }
}

/// Text after the last '.' of the file name, lowercased. A leading dot
/// (hidden file) or a trailing dot yields no extension.
pub fn file_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let index = name.rfind('.')?;
    if index == 0 || index == name.len() - 1 {
        return None;
    }
    Some(name[index + 1..].to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_rules() {
        assert_eq!(file_extension(Path::new("parts.CSV")), Some("csv".to_string()));
        assert_eq!(file_extension(Path::new("dir.v2/parts.tar.json")), Some("json".to_string()));
        assert_eq!(file_extension(Path::new(".hidden")), None);
        assert_eq!(file_extension(Path::new("parts.")), None);
        assert_eq!(file_extension(Path::new("parts")), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FormatRegistry::standard(PdfLayout::default());
        assert_eq!(registry.loader_for(Path::new("a.TxT")).unwrap().extension(), "txt");
        assert_eq!(registry.saver_for(Path::new("a.PDF")).unwrap().extension(), "pdf");
    }

    #[test]
    fn test_pdf_is_save_only() {
        let registry = FormatRegistry::standard(PdfLayout::default());
        assert!(matches!(
            registry.loader_for(Path::new("report.pdf")),
            Err(ShopError::LoadNotSupported { .. })
        ));
        assert_eq!(registry.load_extensions(), vec!["csv", "txt", "json"]);
        assert_eq!(registry.save_extensions(), vec!["csv", "txt", "json", "pdf"]);
    }

    #[test]
    fn test_unknown_extension() {
        let registry = FormatRegistry::standard(PdfLayout::default());
        match registry.saver_for(Path::new("parts.xlsx")) {
            Err(ShopError::UnsupportedFormat { extension, supported }) => {
                assert_eq!(extension, "xlsx");
                assert_eq!(supported, "csv, txt, json, pdf");
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.extension())),
        }
    }
}
