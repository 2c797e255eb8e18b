// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CineFrame - cinematic frame editor
//!
//! A desktop application that crops a photograph into a 2.35:1 letterboxed
//! frame, overlays a Chinese and an English subtitle line and exports the
//! result as a JPEG.

mod app;
mod config;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::CineFrameApp;
use config::AppConfig;
use render::fonts::{self, SubtitleFonts};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::discover(&std::env::current_dir()?)?;
    let subtitle_fonts = SubtitleFonts::from_config(&config.fonts)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("CineFrame"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CineFrame",
        options,
        Box::new(move |cc| {
            fonts::install_egui_fonts(&cc.egui_ctx, &subtitle_fonts);
            Ok(Box::new(CineFrameApp::new(config, subtitle_fonts)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
