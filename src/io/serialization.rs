// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration file deserialization.
//!
//! This module handles reading settings in YAML and JSON formats. The file
//! extension selects the format.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Import data from YAML format.
pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import data from JSON format.
pub fn import_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import data from a YAML or JSON file, chosen by extension.
pub fn import_by_extension<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let extension = path.extension().and_then(|s| s.to_str());
    let data = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported file extension: {:?}", extension),
    };
    data.with_context(|| format!("Failed to read {}", path.display()))
}
