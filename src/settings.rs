//! Generator settings
//!
//! Only where files come from and go to is configurable. The glyph, colors
//! and sizes of the icons are fixed in [`crate::icon`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::icon::IconError;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "assets/icon";

/// Font file tried first
pub const DEFAULT_FONT_PATH: &str = "arial.ttf";

/// Family looked up in the system font database
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub font_path: PathBuf,
    pub font_family: String,
    pub system_fonts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            system_fonts: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self, IconError> {
        let content = std::fs::read_to_string(path).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| IconError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, PathBuf::from("assets/icon"));
        assert_eq!(settings.font_path, PathBuf::from("arial.ttf"));
        assert_eq!(settings.font_family, "Arial");
        assert!(settings.system_fonts);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("output_dir = \"build/icons\"\n").unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("build/icons"));
        assert_eq!(settings.font_family, "Arial");
        assert!(settings.system_fonts);
    }

    #[test]
    fn test_full_toml() {
        let settings = Settings::from_toml(
            r#"
            output_dir = "out"
            font_path = "/usr/share/fonts/DejaVuSans-Bold.ttf"
            font_family = "DejaVu Sans"
            system_fonts = false
            "#,
        )
        .unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(
            settings.font_path,
            PathBuf::from("/usr/share/fonts/DejaVuSans-Bold.ttf")
        );
        assert_eq!(settings.font_family, "DejaVu Sans");
        assert!(!settings.system_fonts);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system_fonts = \"maybe\"").unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, IconError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }));
    }
}
