//! Loading [`FinalizeSettings`] from TOML.
//!
//! Every field is optional; anything left out falls back to the defaults
//! documented in `config/default.toml`, which is embedded in the binary.

use std::path::Path;

use gridline_table_models::FinalizeSettings;

use crate::BorderError;

/// The shipped default settings file.
pub const DEFAULT_SETTINGS_TOML: &str = include_str!("../config/default.toml");

/// Parses settings from a TOML string.
///
/// # Errors
///
/// Returns [`BorderError::Settings`] if the TOML is malformed or a field
/// has the wrong type.
pub fn parse_settings_toml(toml_str: &str) -> Result<FinalizeSettings, BorderError> {
    Ok(toml::from_str(toml_str)?)
}

/// Reads and parses a settings file.
///
/// # Errors
///
/// Returns [`BorderError::Io`] if the file cannot be read, or
/// [`BorderError::Settings`] if it cannot be parsed.
pub fn load_settings(path: &Path) -> Result<FinalizeSettings, BorderError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = parse_settings_toml(&contents)?;
    log::debug!("Loaded settings from {}: {settings:?}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use gridline_shape_models::RgbColor;

    use super::*;

    #[test]
    fn embedded_defaults_match_code_defaults() {
        let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(settings, FinalizeSettings::default());
    }

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(
            parse_settings_toml("").unwrap(),
            FinalizeSettings::default()
        );
    }

    #[test]
    fn partial_hidden_style_keeps_other_defaults() {
        let settings = parse_settings_toml("margin = 0.5\n[hidden_style]\ncolor = 0xEEEEEE\n").unwrap();
        assert!((settings.margin - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.hidden_style.color, RgbColor(0x00EE_EEEE));
        assert!(settings.hidden_style.width.abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = parse_settings_toml("margin = \"wide\"").unwrap_err();
        assert!(matches!(err, BorderError::Settings(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_settings(Path::new("/nonexistent/gridline.toml")).unwrap_err();
        assert!(matches!(err, BorderError::Io(_)));
    }
}
