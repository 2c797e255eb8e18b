// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Subtitle editor panel.
//!
//! One single-line input per subtitle line. The inputs always show the
//! committed text; every change is handed back to the caller for
//! validation, so rejected text disappears on the next frame.

use crate::models::subtitles::{SubtitleLine, SubtitlePair};

/// Display the subtitle inputs and return the edits made this frame.
pub fn show(ui: &mut egui::Ui, subtitles: &SubtitlePair) -> Vec<(SubtitleLine, String)> {
    let mut edits = Vec::new();

    ui.heading("Subtitles");
    ui.add_space(8.0);

    for line in SubtitleLine::ALL {
        let warning = subtitles.warning(line);
        let mut text = subtitles.text(line).to_string();

        let stroke = if warning {
            egui::Stroke::new(2.0, egui::Color32::RED)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(204))
        };

        let response = egui::Frame::none()
            .stroke(stroke)
            .inner_margin(egui::Margin::same(4.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .hint_text(line.placeholder())
                        .desired_width(f32::INFINITY)
                        .frame(false),
                )
            })
            .inner;

        if response.changed() {
            edits.push((line, text));
        }

        if warning {
            ui.label(egui::RichText::new(line.warning()).color(egui::Color32::RED));
        }

        ui.label(
            egui::RichText::new(format!(
                "{}/{}",
                subtitles.text(line).chars().count(),
                line.max_chars()
            ))
            .small()
            .weak(),
        );
        ui.add_space(8.0);
    }

    edits
}
