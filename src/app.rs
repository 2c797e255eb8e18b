// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It translates UI input into editor events, owns the
//! resources that live outside the editor state (textures, the background
//! loader, the pointer capture) and runs the compositor on request.

use crate::config::AppConfig;
use crate::io::media::{self, LoadedImage, PICTURE_EXTENSIONS};
use crate::models::pan::PointerButton;
use crate::models::session::{EditorEvent, EditorState};
use crate::render::compositor::{self, CompositedOutput};
use crate::render::fonts::SubtitleFonts;
use crate::ui::canvas::{self, CaptureEvent, PointerCapture};
use crate::ui::{result, subtitles, toolbar};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Main application state.
pub struct CineFrameApp {
    config: AppConfig,

    fonts: SubtitleFonts,

    /// Editor state, replaced on every event
    state: EditorState,

    /// Texture of the loaded picture for the frame preview
    image_texture: Option<egui::TextureHandle>,

    /// Present only while a pan drag is in progress
    capture: Option<PointerCapture>,

    /// Receiver for background picture loading, taken when it fires
    image_loader: Option<Receiver<Result<LoadedImage>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last generated image
    output: Option<CompositedOutput>,

    /// Texture of the last generated image
    output_texture: Option<egui::TextureHandle>,

    /// Last failure shown to the user
    error_message: Option<String>,
}

impl CineFrameApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig, fonts: SubtitleFonts) -> Self {
        Self {
            config,
            fonts,
            state: EditorState::new(),
            image_texture: None,
            capture: None,
            image_loader: None,
            loading_message: None,
            output: None,
            output_texture: None,
            error_message: None,
        }
    }

    fn dispatch(&mut self, event: EditorEvent) {
        self.state = self.state.apply(event);
    }

    /// Load a picture file in the background.
    ///
    /// Starting a new load drops the receiver of any load still running, so
    /// only the most recent choice is ever applied.
    pub fn load_image_file(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading picture...".to_string());

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = media::load_image(&path);
            if let Ok(ref loaded) = result {
                log::info!("Loaded picture: {} ({}x{})", path.display(), loaded.width, loaded.height);
            }
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Apply a finished background load, if there is one.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.image_loader.as_ref() else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, loaded.pixels.as_raw());
                self.image_texture =
                    Some(ctx.load_texture("source_image", color_image, egui::TextureOptions::LINEAR));

                // The frame is sized against the window as it is right now
                let viewport_width = ctx.screen_rect().width() as f64;
                self.capture = None;
                self.dispatch(EditorEvent::ImageLoaded {
                    pixels: Arc::new(loaded.pixels),
                    viewport_width,
                });
                self.error_message = None;
            }
            Err(e) => {
                log::error!("Failed to load picture: {:#}", e);
                self.error_message = Some(format!("Failed to load picture: {:#}", e));
            }
        }
    }

    /// Forward window-wide pointer input to the pan gesture while captured.
    fn poll_capture(&mut self, ctx: &egui::Context) {
        let Some(capture) = self.capture.as_ref() else {
            return;
        };
        match capture.poll(ctx) {
            CaptureEvent::Move(y) => self.dispatch(EditorEvent::PointerMove { y }),
            CaptureEvent::Released => self.end_drag(),
            CaptureEvent::None => {}
        }
    }

    /// Start a pan for a press on the frame and capture the pointer if the
    /// press began a drag.
    fn begin_drag(&mut self, button: PointerButton, y: f64, frame_top: f32) {
        if self.capture.is_some() {
            return;
        }
        self.dispatch(EditorEvent::PointerDown { button, y });
        if self.state.pan.is_dragging() {
            self.capture = Some(PointerCapture::acquire(frame_top));
            log::info!("Started dragging picture");
        }
    }

    fn end_drag(&mut self) {
        self.capture = None;
        self.dispatch(EditorEvent::PointerUp);
        log::info!("Picture offset set to {:.1}", self.state.offset_y);
    }

    /// Run the compositor and keep the result for preview.
    fn generate(&mut self, ctx: &egui::Context) {
        match compositor::compose(&self.state, &self.fonts) {
            Ok(output) => {
                let size = [output.width() as usize, output.height() as usize];
                let color_image = egui::ColorImage::from_rgb(size, output.image.as_raw());
                self.output_texture =
                    Some(ctx.load_texture("edited_image", color_image, egui::TextureOptions::LINEAR));
                self.output = Some(output);
                self.error_message = None;
            }
            Err(e) => {
                log::error!("Failed to generate image: {}", e);
                self.error_message = Some(format!("Cannot generate: {}", e));
            }
        }
    }

    fn open_picture_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Pictures", PICTURE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path, ctx);
        }
    }

    fn save_output_dialog(&mut self) {
        let Some(ref output) = self.output else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(&self.config.export.file_name)
            .save_file()
        else {
            return;
        };

        match output.save(&path) {
            Ok(()) => log::info!("Saved edited image to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save edited image: {}", e);
                self.error_message = Some(format!("Failed to save: {}", e));
            }
        }
    }

    /// Drop anything still pending: the background load and the capture.
    fn detach(&mut self) {
        self.image_loader = None;
        if self.capture.is_some() {
            self.end_drag();
        }
    }

    fn copy_data_url(&self, ctx: &egui::Context) {
        if let Some(ref output) = self.output {
            let url = output.to_data_url();
            log::info!("Copied data URL ({} bytes)", url.len());
            ctx.output_mut(|o| o.copied_text = url);
        }
    }
}

impl eframe::App for CineFrameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);
        self.poll_capture(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Picture...").clicked() {
                        self.open_picture_dialog(ctx);
                        ui.close_menu();
                    }
                    let has_output = self.output.is_some();
                    if ui
                        .add_enabled(has_output, egui::Button::new("Save Result As..."))
                        .clicked()
                    {
                        self.save_output_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.state.is_ready(), self.state.pan.is_dragging())
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::OpenPicture => self.open_picture_dialog(ctx),
            toolbar::ToolbarAction::Generate => self.generate(ctx),
            toolbar::ToolbarAction::None => {}
        }

        // Subtitle editor, floating over the bottom right corner
        if self.state.image.is_some() {
            let edits = egui::Window::new("Subtitles")
                .anchor(egui::Align2::RIGHT_BOTTOM, [-20.0, -20.0])
                .default_width(250.0)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| subtitles::show(ui, &self.state.subtitles))
                .and_then(|response| response.inner)
                .unwrap_or_default();

            for (line, text) in edits {
                self.dispatch(EditorEvent::SubtitleEdited { line, text });
            }
        }

        if let Some(ref message) = self.error_message {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::RED));
            });
        }

        // Main area
        let (canvas_action, result_action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new(message).size(16.0));
                    });
                }

                egui::ScrollArea::both()
                    .show(ui, |ui| {
                        let canvas_action = ui
                            .vertical_centered(|ui| {
                                ui.add_space(20.0);
                                canvas::show(ui, &self.state, &self.image_texture)
                            })
                            .inner;

                        let result_action = match self.output_texture {
                            Some(ref texture) => result::show(ui, texture),
                            None => result::ResultAction::None,
                        };
                        (canvas_action, result_action)
                    })
                    .inner
            })
            .inner;

        if let canvas::CanvasAction::Press {
            button,
            y,
            frame_top,
        } = canvas_action
        {
            self.begin_drag(button, y, frame_top);
        }

        match result_action {
            result::ResultAction::CopyDataUrl => self.copy_data_url(ctx),
            result::ResultAction::SaveAs => self.save_output_dialog(),
            result::ResultAction::None => {}
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn app_with_picture() -> CineFrameApp {
        let mut app = CineFrameApp::new(AppConfig::default(), SubtitleFonts::bundled().unwrap());
        app.dispatch(EditorEvent::ImageLoaded {
            pixels: Arc::new(RgbaImage::new(1000, 1000)),
            viewport_width: 1920.0,
        });
        app
    }

    fn run_frame(ctx: &egui::Context, app: &mut CineFrameApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.poll_capture(ctx));
    }

    fn primary(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn test_press_without_picture_does_not_capture() {
        let mut app = CineFrameApp::new(AppConfig::default(), SubtitleFonts::bundled().unwrap());
        app.begin_drag(PointerButton::Primary, 10.0, 0.0);
        assert!(app.capture.is_none());
        assert!(!app.state.pan.is_dragging());
    }

    #[test]
    fn test_secondary_press_does_not_capture() {
        let mut app = app_with_picture();
        app.begin_drag(PointerButton::Secondary, 10.0, 0.0);
        assert!(app.capture.is_none());
    }

    #[test]
    fn test_drag_moves_picture_until_release() {
        let mut app = app_with_picture();
        let ctx = egui::Context::default();

        // Frame top at 50, press 100 below it
        run_frame(
            &ctx,
            &mut app,
            vec![egui::Event::PointerMoved(egui::pos2(10.0, 150.0)), primary(10.0, 150.0, true)],
        );
        app.begin_drag(PointerButton::Primary, 100.0, 50.0);
        assert!(app.capture.is_some());

        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(10.0, 120.0))]);
        assert_eq!(app.state.offset_y, -30.0);

        // Released far outside the frame
        run_frame(
            &ctx,
            &mut app,
            vec![egui::Event::PointerMoved(egui::pos2(900.0, 5000.0)), primary(900.0, 5000.0, false)],
        );
        assert!(app.capture.is_none());
        assert!(!app.state.pan.is_dragging());
        assert_eq!(app.state.offset_y, -30.0);

        // Movement after the release no longer pans
        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(10.0, 300.0))]);
        assert_eq!(app.state.offset_y, -30.0);
    }

    #[test]
    fn test_second_press_while_captured_is_ignored() {
        let mut app = app_with_picture();
        app.begin_drag(PointerButton::Primary, 100.0, 50.0);
        let before = app.state.pan;
        app.begin_drag(PointerButton::Primary, 300.0, 50.0);
        assert_eq!(app.state.pan, before);
    }

    #[test]
    fn test_detach_ends_drag() {
        let mut app = app_with_picture();
        app.begin_drag(PointerButton::Primary, 100.0, 50.0);
        app.detach();
        assert!(app.capture.is_none());
        assert!(!app.state.pan.is_dragging());
        assert!(app.image_loader.is_none());
    }
}
