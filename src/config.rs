// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Optional settings file.
//!
//! `cineframe.yaml`, `cineframe.yml` or `cineframe.json` in the working
//! directory is read once at startup. It only overrides subtitle fonts and
//! the suggested export name; without it the defaults apply.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file names looked for, in order.
pub const CONFIG_FILES: [&str; 3] = ["cineframe.yaml", "cineframe.yml", "cineframe.json"];

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fonts: FontsConfig,
    pub export: ExportConfig,
}

/// Font files overriding the system lookup for the two subtitle lines.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub primary: Option<FontSource>,
    pub secondary: Option<FontSource>,
}

/// A font file and the face to use inside it (for collections).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontSource {
    pub path: PathBuf,
    #[serde(default)]
    pub index: u32,
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name suggested by the save dialog.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "edited.jpg".to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        crate::io::serialization::import_by_extension(path)
    }

    /// Load the first settings file found in `dir`, or the defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let Some(path) = CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
        else {
            return Ok(Self::default());
        };

        let config = Self::load(&path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}
