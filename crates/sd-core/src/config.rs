//! Editor configuration: drawing defaults and color fallback.
//!
//! Built with `EditorConfig::builder()` in code, or deserialized from JSON
//! (e.g. language-server initialization options). Every path goes through
//! `validate`, so a constructed config always produces lines that parse.

use crate::color::{ColorResolver, resolve_color};
use crate::model::ColorToken;
use crate::parser::is_color_token;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("default thickness must be a finite, non-negative number (got {0})")]
    InvalidThickness(f64),
    #[error("`{field}` is not a valid color token: `{token}`")]
    MalformedColor { field: &'static str, token: String },
    #[error("fallback color `{0}` does not resolve to a color")]
    UnresolvableFallback(String),
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drawing defaults applied to shapes created by a gesture, and the color
/// used when a token cannot be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Outline thickness of newly drawn shapes.
    pub default_thickness: f64,
    /// Outline color token of newly drawn shapes.
    pub default_outline: ColorToken,
    /// Fill color token of newly drawn shapes.
    pub default_fill: ColorToken,
    /// Color rendered for unresolvable tokens. Must itself resolve.
    pub fallback_color: ColorToken,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_thickness: 1.0,
            default_outline: ColorToken::new("black"),
            default_fill: ColorToken::new("white"),
            fallback_color: ColorToken::new("black"),
        }
    }
}

impl EditorConfig {
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::default()
    }

    /// Parse and validate a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as `from_json`, for an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_thickness.is_finite() || self.default_thickness < 0.0 {
            return Err(ConfigError::InvalidThickness(self.default_thickness));
        }
        for (field, token) in [
            ("default_outline", &self.default_outline),
            ("default_fill", &self.default_fill),
            ("fallback_color", &self.fallback_color),
        ] {
            if !is_color_token(token.as_str()) {
                return Err(ConfigError::MalformedColor {
                    field,
                    token: token.to_string(),
                });
            }
        }
        if resolve_color(self.fallback_color.as_str()).is_none() {
            return Err(ConfigError::UnresolvableFallback(
                self.fallback_color.to_string(),
            ));
        }
        Ok(())
    }

    /// Resolver using the configured fallback.
    pub fn resolver(&self) -> ColorResolver {
        let default = ColorResolver::default();
        let fallback = resolve_color(self.fallback_color.as_str()).unwrap_or(default.fallback);
        ColorResolver::new(fallback)
    }
}

/// Builder for `EditorConfig`.
#[derive(Debug, Clone, Default)]
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.config.default_thickness = thickness;
        self
    }

    pub fn outline(mut self, token: impl Into<ColorToken>) -> Self {
        self.config.default_outline = token.into();
        self
    }

    pub fn fill(mut self, token: impl Into<ColorToken>) -> Self {
        self.config.default_fill = token.into();
        self
    }

    pub fn fallback(mut self, token: impl Into<ColorToken>) -> Self {
        self.config.fallback_color = token.into();
        self
    }

    pub fn build(self) -> Result<EditorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
