// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame preview and pan gesture input.
//!
//! This module draws the letterboxed frame with the picture at its current
//! offset and the live subtitles, and turns pointer input into pan events.

use crate::models::pan::PointerButton;
use crate::models::session::EditorState;
use crate::models::subtitles::SubtitleLine;
use crate::render::compositor::{LINE_GAP, SHADOW_OFFSET, SUBTITLE_PADDING};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// A pointer button went down on the frame.
    Press {
        button: PointerButton,
        /// Pointer Y relative to the frame's top edge.
        y: f64,
        /// Screen Y of the frame's top edge.
        frame_top: f32,
    },
}

/// What a [`PointerCapture`] saw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureEvent {
    /// No pointer movement.
    None,
    /// Pointer at this Y, relative to the frame top at capture time.
    Move(f64),
    /// The primary button is no longer held, another button was released
    /// or the pointer left the window.
    Released,
}

/// Window-wide pointer tracking for one pan drag.
///
/// Acquired when a drag starts and dropped when it ends. While held, pointer
/// movement anywhere in the window drives the pan, and a release anywhere
/// ends it.
pub struct PointerCapture {
    frame_top: f32,
}

impl PointerCapture {
    pub fn acquire(frame_top: f32) -> Self {
        log::debug!("Pointer captured");
        Self { frame_top }
    }

    /// Read this frame's pointer input.
    pub fn poll(&self, ctx: &egui::Context) -> CaptureEvent {
        ctx.input(|i| self.read(&i.pointer))
    }

    fn read(&self, pointer: &egui::PointerState) -> CaptureEvent {
        if pointer.any_released() || !pointer.primary_down() {
            return CaptureEvent::Released;
        }
        match pointer.latest_pos() {
            // Left the window; the release would never be seen
            None => CaptureEvent::Released,
            Some(pos) if pointer.delta() != egui::Vec2::ZERO => {
                CaptureEvent::Move((pos.y - self.frame_top) as f64)
            }
            Some(_) => CaptureEvent::None,
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        log::debug!("Pointer capture released");
    }
}

/// Display the frame preview and report presses on it.
pub fn show(
    ui: &mut egui::Ui,
    state: &EditorState,
    image_texture: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let (Some(texture), Some(image)) = (image_texture, &state.image) else {
        return CanvasAction::None;
    };
    if state.frame.is_empty() {
        return CanvasAction::None;
    }

    let frame = state.frame.raster();
    let frame_size = egui::vec2(frame.width as f32, frame.height as f32);
    let (frame_rect, response) = ui.allocate_exact_size(frame_size, egui::Sense::drag());
    let painter = ui.painter_at(frame_rect);

    painter.rect_filled(frame_rect, 0.0, egui::Color32::from_gray(240));

    // Picture at its current offset, clipped to the frame
    let image_rect = egui::Rect::from_min_size(
        frame_rect.min + egui::vec2(0.0, state.offset_y as f32),
        egui::vec2(frame.width as f32, image.displayed_height() as f32),
    );
    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    // Letterbox bars
    let bar = frame.bar_height() as f32;
    painter.rect_filled(
        egui::Rect::from_min_size(frame_rect.min, egui::vec2(frame_rect.width(), bar)),
        0.0,
        egui::Color32::BLACK,
    );
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(frame_rect.min.x, frame_rect.max.y - bar),
            frame_rect.max,
        ),
        0.0,
        egui::Color32::BLACK,
    );

    draw_subtitles(&painter, frame_rect, state);

    ui.painter().rect_stroke(
        frame_rect.expand(1.0),
        0.0,
        egui::Stroke::new(2.0, egui::Color32::from_gray(51)),
    );

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical);
    }

    if !response.hovered() && !response.is_pointer_button_down_on() {
        return CanvasAction::None;
    }

    let buttons = [
        (PointerButton::Primary, egui::PointerButton::Primary),
        (PointerButton::Secondary, egui::PointerButton::Secondary),
        (PointerButton::Middle, egui::PointerButton::Middle),
    ];
    let press = ui.input(|i| {
        let pos = i.pointer.interact_pos()?;
        if !frame_rect.contains(pos) {
            return None;
        }
        buttons
            .iter()
            .find(|(_, egui_button)| i.pointer.button_pressed(*egui_button))
            .map(|(button, _)| (*button, pos.y))
    });

    match press {
        Some((button, y)) => CanvasAction::Press {
            button,
            y: (y - frame_rect.top()) as f64,
            frame_top: frame_rect.top(),
        },
        None => CanvasAction::None,
    }
}

/// Draw the subtitle lines the way the compositor lays them out.
fn draw_subtitles(painter: &egui::Painter, frame_rect: egui::Rect, state: &EditorState) {
    let bottom_bar_top = frame_rect.top() + state.frame.raster().bottom_bar_top() as f32;
    let secondary_bottom = bottom_bar_top - SUBTITLE_PADDING as f32;
    let primary_bottom =
        secondary_bottom - SubtitleLine::Secondary.font_size() - LINE_GAP as f32;

    for (line, bottom) in [
        (SubtitleLine::Primary, primary_bottom),
        (SubtitleLine::Secondary, secondary_bottom),
    ] {
        let text = state.subtitles.text(line);
        if text.is_empty() {
            continue;
        }
        let font = egui::FontId::proportional(line.font_size());
        let anchor = egui::pos2(frame_rect.center().x, bottom);
        let shadow = egui::vec2(SHADOW_OFFSET as f32, SHADOW_OFFSET as f32);

        painter.text(
            anchor + shadow,
            egui::Align2::CENTER_BOTTOM,
            text,
            font.clone(),
            egui::Color32::BLACK,
        );
        painter.text(
            anchor,
            egui::Align2::CENTER_BOTTOM,
            text,
            font,
            egui::Color32::WHITE,
        );
    }
}
