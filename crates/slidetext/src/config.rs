use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ParseError;
use crate::model::{Color, FontFamily, FontSize, ItemTemplate};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "slidetext";

pub const VALID_KEYS: &[&str] = &[
    "defaults.text",
    "defaults.font_size",
    "defaults.color",
    "defaults.font_family",
    "editor.aspect",
    "editor.release_on_focus_loss",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorConfig>,
}

/// Attributes for newly added text items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectRatio>,

    /// Treat window focus loss as the end of a drag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_on_focus_loss: Option<bool>,
}

/// Shape of the slide container on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    Portrait9x16,
    Landscape16x9,
    Portrait4x5,
    Square,
}

impl AspectRatio {
    /// Width divided by height.
    pub fn ratio(&self) -> f32 {
        match self {
            Self::Portrait9x16 => 9.0 / 16.0,
            Self::Landscape16x9 => 16.0 / 9.0,
            Self::Portrait4x5 => 4.0 / 5.0,
            Self::Square => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
            Self::Portrait4x5 => "4:5",
            Self::Square => "1:1",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "9:16" => Ok(Self::Portrait9x16),
            "16:9" => Ok(Self::Landscape16x9),
            "4:5" => Ok(Self::Portrait4x5),
            "1:1" => Ok(Self::Square),
            _ => Err(ParseError::InvalidAspect(s.to_string())),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(aspect: AspectRatio) -> Self {
        aspect.label().to_string()
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `slidetext config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::debug!("using default config: {e}");
            Self::default()
        })
    }

    /// Load `path` if it exists, defaults otherwise. A file that exists but
    /// cannot be read or parsed is an error, so edits never overwrite it.
    pub fn load_existing(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# slidetext configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.text" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .text = Some(value.to_string());
            }
            "defaults.font_size" => {
                let size: FontSize = value.parse()?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .font_size = Some(size);
            }
            "defaults.color" => {
                let color: Color = value.parse()?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .color = Some(color);
            }
            "defaults.font_family" => {
                let family: FontFamily = value.parse()?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .font_family = Some(family);
            }
            "editor.aspect" => {
                let aspect: AspectRatio = value.parse()?;
                self.editor
                    .get_or_insert_with(EditorConfig::default)
                    .aspect = Some(aspect);
            }
            "editor.release_on_focus_loss" => {
                let enabled = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!(
                        "Invalid release_on_focus_loss: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.editor
                    .get_or_insert_with(EditorConfig::default)
                    .release_on_focus_loss = Some(enabled);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Template for new items, falling back to built-in defaults per field.
    pub fn item_template(&self) -> ItemTemplate {
        let base = ItemTemplate::default();
        let Some(d) = &self.defaults else {
            return base;
        };
        ItemTemplate {
            text: d.text.clone().unwrap_or(base.text),
            font_size: d.font_size.unwrap_or(base.font_size),
            color: d.color.unwrap_or(base.color),
            font_family: d.font_family.unwrap_or(base.font_family),
        }
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.editor
            .as_ref()
            .and_then(|e| e.aspect)
            .unwrap_or_default()
    }

    pub fn release_on_focus_loss(&self) -> bool {
        self.editor
            .as_ref()
            .and_then(|e| e.release_on_focus_loss)
            .unwrap_or(true)
    }
}
