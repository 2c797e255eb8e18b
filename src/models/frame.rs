// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cinematic frame geometry.
//!
//! The frame is a fixed 2.35:1 window with a black bar along the top and
//! bottom edge. Its size is derived from the loaded picture and the window
//! width at the moment the picture finished decoding.

/// Width to height ratio of the frame.
pub const ASPECT_RATIO: f64 = 2.35;

/// Height of each letterbox bar as a fraction of the frame height.
pub const BAR_FRACTION: f64 = 0.075;

/// Largest share of the viewport width the frame may occupy.
pub const VIEWPORT_FRACTION: f64 = 0.9;

/// Display and export size of the frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDimensions {
    pub width: f64,
    pub height: f64,
}

impl FrameDimensions {
    /// Frame used while no picture is loaded.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Compute the frame for a picture of `natural_width` pixels shown in a
    /// viewport `viewport_width` pixels wide.
    ///
    /// This is a snapshot: callers compute it once per picture load and do
    /// not refresh it when the viewport is resized afterwards.
    pub fn from_image(natural_width: f64, viewport_width: f64) -> Self {
        if natural_width <= 0.0 || viewport_width <= 0.0 {
            return Self::ZERO;
        }

        let width = natural_width.min(viewport_width * VIEWPORT_FRACTION);
        Self {
            width,
            height: width / ASPECT_RATIO,
        }
    }

    /// True when there is nothing to show or export.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Height of one letterbox bar.
    pub fn bar_height(&self) -> f64 {
        self.height * BAR_FRACTION
    }

    /// Height of the visible window between the two bars.
    pub fn crop_area_height(&self) -> f64 {
        self.height * (1.0 - 2.0 * BAR_FRACTION)
    }

    /// Y coordinate of the top edge of the bottom bar.
    pub fn bottom_bar_top(&self) -> f64 {
        self.height * (1.0 - BAR_FRACTION)
    }

    /// Height of the picture once it is fitted to the frame width.
    pub fn displayed_image_height(&self, natural_width: u32, natural_height: u32) -> f64 {
        if natural_width == 0 {
            return 0.0;
        }
        natural_height as f64 * self.width / natural_width as f64
    }

    /// Raster size used when exporting, rounded to whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }

    /// The frame snapped to [`pixel_size`](Self::pixel_size). Pan limits,
    /// the preview and the export all lay out against this size.
    pub fn raster(&self) -> Self {
        let (width, height) = self.pixel_size();
        Self {
            width: width as f64,
            height: height as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_narrow_image_keeps_natural_width() {
        let frame = FrameDimensions::from_image(1000.0, 1920.0);
        assert_eq!(frame.width, 1000.0);
        assert!((frame.height - 1000.0 / 2.35).abs() < 1e-9);
        assert_eq!(frame.pixel_size(), (1000, 426));
    }

    #[test]
    fn test_raster_rounds_both_edges() {
        let raster = FrameDimensions::from_image(1000.0, 1920.0).raster();
        assert_eq!(
            raster,
            FrameDimensions {
                width: 1000.0,
                height: 426.0
            }
        );
        assert_eq!(raster.raster(), raster);
        assert_eq!(FrameDimensions::ZERO.raster(), FrameDimensions::ZERO);
    }

    #[test]
    fn test_wide_image_limited_by_viewport() {
        let frame = FrameDimensions::from_image(4000.0, 1000.0);
        assert!((frame.width - 900.0).abs() < 1e-9);
        assert!((frame.height - 900.0 / 2.35).abs() < 1e-9);
    }

    #[test]
    fn test_zero_inputs_give_empty_frame() {
        assert!(FrameDimensions::from_image(0.0, 1000.0).is_empty());
        assert!(FrameDimensions::from_image(1000.0, 0.0).is_empty());
        assert_eq!(FrameDimensions::default(), FrameDimensions::ZERO);
    }

    #[test]
    fn test_bars_and_crop_area() {
        let frame = FrameDimensions {
            width: 1000.0,
            height: 400.0,
        };
        assert!((frame.bar_height() - 30.0).abs() < 1e-9);
        assert!((frame.crop_area_height() - 340.0).abs() < 1e-9);
        assert!((frame.bottom_bar_top() - 370.0).abs() < 1e-9);
    }

    #[test]
    fn test_displayed_height_follows_frame_width() {
        let frame = FrameDimensions::from_image(2000.0, 1000.0);
        // 2000x1500 picture shown 900 wide
        assert!((frame.displayed_image_height(2000, 1500) - 675.0).abs() < 1e-9);
        assert_eq!(frame.displayed_image_height(0, 1500), 0.0);
    }

    proptest! {
        #[test]
        fn prop_frame_width_and_ratio(w in 1.0f64..10_000.0, v in 1.0f64..10_000.0) {
            let frame = FrameDimensions::from_image(w, v);
            prop_assert!((frame.width - w.min(0.9 * v)).abs() < 1e-9);
            prop_assert!((frame.height - frame.width / 2.35).abs() < 1e-9);
        }
    }
}
