// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor session state.
//!
//! All editor state lives in [`EditorState`], an immutable value. UI input is
//! turned into [`EditorEvent`]s and applied with [`EditorState::apply`], which
//! returns the next state. Nothing here knows about egui.

use super::frame::FrameDimensions;
use super::pan::{PanLimits, PanState, PointerButton};
use super::subtitles::{SubtitleLine, SubtitlePair};
use image::RgbaImage;
use std::sync::Arc;

/// A decoded picture chosen by the user.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// RGBA pixels at natural resolution.
    pub pixels: Arc<RgbaImage>,
    /// Width the picture is displayed at inside the frame.
    pub displayed_width: f64,
}

impl SourceImage {
    pub fn new(pixels: Arc<RgbaImage>, displayed_width: f64) -> Self {
        Self {
            pixels,
            displayed_width,
        }
    }

    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Natural pixels per displayed pixel.
    pub fn scale_factor(&self) -> f64 {
        if self.displayed_width <= 0.0 {
            return 1.0;
        }
        self.natural_width() as f64 / self.displayed_width
    }

    /// Height of the picture as displayed.
    pub fn displayed_height(&self) -> f64 {
        self.natural_height() as f64 / self.scale_factor()
    }
}

impl PartialEq for SourceImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels) && self.displayed_width == other.displayed_width
    }
}

/// Input to the editor state machine.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// A picture finished decoding while the viewport was `viewport_width` wide.
    ImageLoaded {
        pixels: Arc<RgbaImage>,
        viewport_width: f64,
    },
    /// Pointer pressed on the frame, `y` relative to the frame's top edge.
    PointerDown { button: PointerButton, y: f64 },
    /// Pointer moved anywhere while the gesture may be active.
    PointerMove { y: f64 },
    /// Pointer released anywhere, or the gesture was abandoned.
    PointerUp,
    /// A subtitle input changed.
    SubtitleEdited { line: SubtitleLine, text: String },
}

/// Complete editor state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub image: Option<SourceImage>,
    pub frame: FrameDimensions,
    /// Vertical translation of the picture inside the frame, in pixels.
    pub offset_y: f64,
    pub pan: PanState,
    pub subtitles: SubtitlePair,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a picture is loaded and the frame has a size.
    pub fn is_ready(&self) -> bool {
        self.image.is_some() && !self.frame.is_empty()
    }

    /// Current pan limits, if a picture is loaded.
    ///
    /// Limits follow the whole-pixel frame height, the height that is
    /// exported.
    pub fn pan_limits(&self) -> Option<PanLimits> {
        let frame_height = self.frame.raster().height;
        self.image
            .as_ref()
            .map(|image| PanLimits::new(frame_height, image.displayed_height()))
    }

    /// Apply one event and return the resulting state.
    pub fn apply(&self, event: EditorEvent) -> EditorState {
        let mut next = self.clone();
        match event {
            EditorEvent::ImageLoaded {
                pixels,
                viewport_width,
            } => {
                let frame = FrameDimensions::from_image(pixels.width() as f64, viewport_width);
                log::info!(
                    "Frame set to {:.1}x{:.1} for {}x{} picture",
                    frame.width,
                    frame.height,
                    pixels.width(),
                    pixels.height()
                );
                next.image = Some(SourceImage::new(pixels, frame.width));
                next.frame = frame;
                next.offset_y = 0.0;
                next.pan = PanState::Idle;
            }
            EditorEvent::PointerDown { button, y } => {
                if self.image.is_some() && !self.pan.is_dragging() {
                    next.pan = self.pan.press(button, y, self.offset_y);
                }
            }
            EditorEvent::PointerMove { y } => {
                if let Some(limits) = self.pan_limits() {
                    if let Some(offset) = self.pan.drag_to(y, &limits) {
                        next.offset_y = offset;
                    }
                }
            }
            EditorEvent::PointerUp => {
                next.pan = self.pan.release();
            }
            EditorEvent::SubtitleEdited { line, text } => {
                next.subtitles = self.subtitles.submit(line, &text);
            }
        }
        next
    }
}
