// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Vertical pan gesture.
//!
//! Dragging moves the picture up or down inside the frame. The offset is
//! clamped so the picture always covers the window between the two bars.

use super::frame::BAR_FRACTION;

/// Pointer button that started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// State of the pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    /// Pointer Y minus the offset at the moment of the press.
    Dragging { anchor: f64 },
}

/// Allowed range for the vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanLimits {
    /// Offset that puts the picture's bottom edge on the bottom bar.
    pub lower: f64,
    /// Offset that puts the picture's top edge on the top bar.
    pub upper: f64,
}

impl PanLimits {
    /// Limits for a picture `image_height` tall inside a frame `frame_height` tall.
    pub fn new(frame_height: f64, image_height: f64) -> Self {
        let bar_height = frame_height * BAR_FRACTION;
        Self {
            lower: frame_height - image_height - bar_height,
            upper: bar_height,
        }
    }

    /// Clamp a candidate offset into range.
    ///
    /// A picture shorter than the visible window has `lower > upper`; the
    /// upper limit wins in that case.
    pub fn clamp(&self, candidate: f64) -> f64 {
        candidate.max(self.lower).min(self.upper)
    }
}

impl PanState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanState::Dragging { .. })
    }

    /// Handle a pointer press at `pointer_y` while the picture sits at `offset`.
    pub fn press(self, button: PointerButton, pointer_y: f64, offset: f64) -> Self {
        if button != PointerButton::Primary {
            return self;
        }
        PanState::Dragging {
            anchor: pointer_y - offset,
        }
    }

    /// Offset for a pointer move to `pointer_y`, or `None` when idle.
    pub fn drag_to(&self, pointer_y: f64, limits: &PanLimits) -> Option<f64> {
        match self {
            PanState::Dragging { anchor } => Some(limits.clamp(pointer_y - anchor)),
            PanState::Idle => None,
        }
    }

    /// Handle the pointer release.
    pub fn release(self) -> Self {
        PanState::Idle
    }
}
