use crate::formats::PdfLayout;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_extension, validate_finite, validate_non_empty_string, validate_path, validate_range,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SAVE_FORMATS: [&str; 4] = ["csv", "txt", "json", "pdf"];

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub session: SessionConfig,
    pub pdf: PdfLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_save_format: String,
    pub start_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_save_format: "csv".to_string(),
            start_file: None,
        }
    }
}

impl ShopConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShopError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShopError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_extension(
            "session.default_save_format",
            &self.session.default_save_format,
            &SAVE_FORMATS,
        )?;

        if let Some(start_file) = &self.session.start_file {
            validate_path("session.start_file", start_file)?;
        }

        validate_non_empty_string("pdf.title", &self.pdf.title)?;
        for (field, value) in [
            ("pdf.font_size", self.pdf.font_size),
            ("pdf.leading", self.pdf.leading),
            ("pdf.margin_left", self.pdf.margin_left),
            ("pdf.start_y", self.pdf.start_y),
            ("pdf.bottom_margin", self.pdf.bottom_margin),
            ("pdf.page_width", self.pdf.page_width),
            ("pdf.page_height", self.pdf.page_height),
        ] {
            validate_finite(field, value)?;
        }
        validate_range("pdf.font_size", self.pdf.font_size, 4.0, 72.0)?;
        validate_range("pdf.leading", self.pdf.leading, self.pdf.font_size, 144.0)?;
        validate_range("pdf.page_width", self.pdf.page_width, 72.0, 14400.0)?;
        validate_range("pdf.page_height", self.pdf.page_height, 72.0, 14400.0)?;
        validate_range("pdf.margin_left", self.pdf.margin_left, 0.0, self.pdf.page_width)?;
        validate_range("pdf.bottom_margin", self.pdf.bottom_margin, 0.0, self.pdf.page_height)?;
        validate_range(
            "pdf.start_y",
            self.pdf.start_y,
            self.pdf.bottom_margin + self.pdf.leading * 3.0,
            self.pdf.page_height,
        )?;

        Ok(())
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
