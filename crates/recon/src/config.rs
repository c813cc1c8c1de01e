use serde::Deserialize;

use crate::error::ReconError;
use crate::native::NativeLayout;

/// Substituted for a field whose source has no entry for the verse.
pub const DEFAULT_PLACEHOLDER: &str = "not found";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    pub name: String,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub placeholders: PlaceholderConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    pub transliteration: TransliterationSource,
    pub translation: TranslationSource,
    #[serde(default)]
    pub native: Option<NativeSource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransliterationSource {
    pub file: String,
    /// Key tag every line must carry (`RV` for `RV_01,001.01a`). Any tag when absent.
    #[serde(default)]
    pub expected_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationSource {
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSource {
    pub file: String,
    #[serde(default)]
    pub layout: NativeLayout,
}

// ---------------------------------------------------------------------------
// Placeholders, alignment, output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholderConfig {
    #[serde(default = "default_placeholder")]
    pub native: String,
    #[serde(default = "default_placeholder")]
    pub translation: String,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            native: default_placeholder(),
            translation: default_placeholder(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Treat a translation/transliteration count mismatch as a failed run.
    /// The engine still produces every record; only the caller's verdict changes.
    #[serde(default)]
    pub fail_on_mismatch: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config for in-memory runs where no files are involved.
    pub fn in_memory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sources: SourcesConfig {
                transliteration: TransliterationSource {
                    file: String::new(),
                    expected_tag: None,
                },
                translation: TranslationSource { file: String::new() },
                native: None,
            },
            placeholders: PlaceholderConfig::default(),
            alignment: AlignmentConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn expected_tag(&self) -> Option<&str> {
        self.sources.transliteration.expected_tag.as_deref()
    }

    pub fn native_layout(&self) -> NativeLayout {
        self.sources
            .native
            .as_ref()
            .map(|n| n.layout)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        let mut files = vec![
            ("transliteration", &self.sources.transliteration.file),
            ("translation", &self.sources.translation.file),
        ];
        if let Some(ref native) = self.sources.native {
            files.push(("native", &native.file));
        }
        for (source, file) in files {
            if file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "sources.{source}.file must not be empty"
                )));
            }
        }

        if let Some(tag) = self.expected_tag() {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ReconError::ConfigValidation(format!(
                    "expected_tag must be ASCII alphanumeric, got '{tag}'"
                )));
            }
        }

        // An empty placeholder would be indistinguishable from an empty verse.
        for (field, value) in [
            ("native", &self.placeholders.native),
            ("translation", &self.placeholders.translation),
        ] {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "placeholders.{field} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
