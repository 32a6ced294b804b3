use crate::utils::error::{Result, ShopError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a price field. Accepts any decimal `f64` syntax, rejects negative,
/// NaN and infinite values.
pub fn parse_price(raw: &str) -> Option<f64> {
    let price: f64 = raw.trim().parse().ok()?;
    if price.is_finite() && price >= 0.0 {
        Some(price)
    } else {
        None
    }
}

/// Parses a quantity field as a non-negative whole number.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_extension(field_name: &str, extension: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|ext| ext.eq_ignore_ascii_case(extension)) {
        return Ok(());
    }
    Err(ShopError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: extension.to_string(),
        reason: format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
