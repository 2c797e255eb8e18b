// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the rectangle math shared by the preview and the
//! compositor: clipping a source/destination pair against the picture and
//! converting rectangles to whole pixels.

/// Axis-aligned rectangle in floating point pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Round to whole pixels as `(x, y, width, height)`.
    pub fn to_pixels(&self) -> (i64, i64, u32, u32) {
        let x0 = self.x.round();
        let y0 = self.y.round();
        let x1 = (self.x + self.width).round();
        let y1 = (self.y + self.height).round();
        (
            x0 as i64,
            y0 as i64,
            (x1 - x0).max(0.0) as u32,
            (y1 - y0).max(0.0) as u32,
        )
    }
}

/// Clip a `src` rectangle to a `bounds_width` x `bounds_height` picture and
/// shrink `dst` by the same proportions.
///
/// Returns `None` when nothing of the source remains.
pub fn clip_draw_rects(
    src: RectF,
    dst: RectF,
    bounds_width: f64,
    bounds_height: f64,
) -> Option<(RectF, RectF)> {
    if src.is_empty() || dst.is_empty() {
        return None;
    }

    let scale_x = dst.width / src.width;
    let scale_y = dst.height / src.height;

    let x0 = src.x.max(0.0);
    let y0 = src.y.max(0.0);
    let x1 = (src.x + src.width).min(bounds_width);
    let y1 = (src.y + src.height).min(bounds_height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let clipped_src = RectF::new(x0, y0, x1 - x0, y1 - y0);
    let clipped_dst = RectF::new(
        dst.x + (x0 - src.x) * scale_x,
        dst.y + (y0 - src.y) * scale_y,
        clipped_src.width * scale_x,
        clipped_src.height * scale_y,
    );
    Some((clipped_src, clipped_dst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_rects_unchanged() {
        let src = RectF::new(0.0, 10.0, 100.0, 50.0);
        let dst = RectF::new(0.0, 5.0, 200.0, 100.0);
        let (s, d) = clip_draw_rects(src, dst, 100.0, 100.0).unwrap();
        assert_eq!(s, src);
        assert_eq!(d, dst);
    }

    #[test]
    fn test_bottom_overflow_shrinks_destination() {
        let src = RectF::new(0.0, 80.0, 100.0, 40.0);
        let dst = RectF::new(0.0, 0.0, 100.0, 40.0);
        let (s, d) = clip_draw_rects(src, dst, 100.0, 100.0).unwrap();
        assert_eq!(s.height, 20.0);
        assert_eq!(d.height, 20.0);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn test_fully_outside_is_none() {
        let src = RectF::new(0.0, 150.0, 100.0, 40.0);
        let dst = RectF::new(0.0, 0.0, 100.0, 40.0);
        assert!(clip_draw_rects(src, dst, 100.0, 100.0).is_none());
    }

    #[test]
    fn test_to_pixels_rounds_edges() {
        let rect = RectF::new(0.0, 31.95, 1000.0, 362.1);
        assert_eq!(rect.to_pixels(), (0, 32, 1000, 362));
    }
}
