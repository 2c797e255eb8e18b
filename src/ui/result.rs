// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview of the last generated image.

/// Result of interaction with the preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    None,
    CopyDataUrl,
    SaveAs,
}

/// Display the generated image scaled to the available width.
pub fn show(ui: &mut egui::Ui, texture: &egui::TextureHandle) -> ResultAction {
    let mut action = ResultAction::None;

    ui.add_space(20.0);
    ui.heading("Edited Image:");

    ui.horizontal(|ui| {
        if ui.button("Copy Data URL").clicked() {
            action = ResultAction::CopyDataUrl;
        }
        if ui.button("Save As...").clicked() {
            action = ResultAction::SaveAs;
        }
    });

    let size = texture.size_vec2();
    let width = size.x.min(ui.available_width());
    let height = if size.x > 0.0 { size.y * width / size.x } else { 0.0 };
    ui.image((texture.id(), egui::vec2(width, height)));

    action
}
