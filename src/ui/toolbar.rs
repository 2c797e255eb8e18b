// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the picture and export commands.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    OpenPicture,
    Generate,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, can_generate: bool, is_dragging: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Choose a picture:");
        if ui.button("🗁 Open Picture...").clicked() {
            action = ToolbarAction::OpenPicture;
        }

        ui.separator();

        if ui
            .add_enabled(can_generate, egui::Button::new("Generate Edited Image"))
            .clicked()
        {
            action = ToolbarAction::Generate;
        }

        ui.separator();

        let hint = if !can_generate {
            "Open a PNG or JPEG picture to begin"
        } else if is_dragging {
            "Release to set the picture position"
        } else {
            "Drag the picture up or down to choose the visible part"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
