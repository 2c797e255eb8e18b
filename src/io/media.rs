// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Picture file loading.
//!
//! This module handles loading PNG and JPEG files and converting them to
//! RGBA pixels suitable for both the egui preview and the compositor.

use anyhow::{bail, Context, Result};
use image::{ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

/// File extensions offered by the open dialog.
pub const PICTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A decoded picture.
#[derive(Debug)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

/// Load a PNG or JPEG file from disk.
///
/// The format is sniffed from the file contents, so a misnamed file is still
/// accepted as long as it really is a PNG or JPEG.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Cannot open {}", path.display()))?
        .with_guessed_format()?;

    match reader.format() {
        Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
        Some(other) => bail!("Unsupported picture format {:?}, expected PNG or JPEG", other),
        None => bail!("Unrecognized picture format in {}", path.display()),
    }

    let pixels = reader
        .decode()
        .with_context(|| format!("Cannot decode {}", path.display()))?
        .to_rgba8();

    Ok(LoadedImage {
        width: pixels.width(),
        height: pixels.height(),
        pixels,
    })
}
