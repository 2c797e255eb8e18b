// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Final image composition.
//!
//! Renders the letterbox bars, the visible slice of the picture and the two
//! subtitle lines onto a raster the size of the frame, then encodes it as a
//! JPEG at full quality. The result is a snapshot of the editor state at the
//! time of the call.

use super::error::{ComposeError, ComposeResult};
use super::fonts::SubtitleFonts;
use crate::models::session::EditorState;
use crate::models::subtitles::SubtitleLine;
use crate::util::geometry::{clip_draw_rects, RectF};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;

/// Gap between the bottom bar and the secondary subtitle line.
pub const SUBTITLE_PADDING: f64 = 10.0;

/// Extra gap between the two subtitle lines.
pub const LINE_GAP: f64 = 5.0;

/// Shadow blur radius, in the 2D canvas sense (twice the Gaussian sigma).
pub const SHADOW_BLUR: f32 = 4.0;

/// Shadow displacement on both axes.
pub const SHADOW_OFFSET: i32 = 2;

pub const JPEG_QUALITY: u8 = 100;

const BAR_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// An exported image.
pub struct CompositedOutput {
    /// Raster as it was encoded.
    pub image: RgbImage,
    /// JPEG stream.
    pub jpeg: Vec<u8>,
}

impl CompositedOutput {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The JPEG stream as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(&self.jpeg)
        )
    }

    /// Write the JPEG stream to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.jpeg)?;
        Ok(())
    }
}

/// Compose the current editor state into a JPEG.
pub fn compose(state: &EditorState, fonts: &SubtitleFonts) -> ComposeResult<CompositedOutput> {
    let source = state.image.as_ref().ok_or(ComposeError::NotReady)?;
    let (width, height) = state.frame.pixel_size();
    if state.frame.is_empty() || width == 0 || height == 0 {
        return Err(ComposeError::EmptyFrame);
    }
    let frame = state.frame.raster();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    let bar_height = frame.bar_height();
    fill_rect(&mut canvas, RectF::new(0.0, 0.0, frame.width, bar_height), BAR_COLOR);
    fill_rect(
        &mut canvas,
        RectF::new(0.0, frame.bottom_bar_top(), frame.width, bar_height),
        BAR_COLOR,
    );

    let natural_width = source.natural_width() as f64;
    let natural_height = source.natural_height() as f64;
    let scale = source.scale_factor();
    let offset = state.offset_y;

    let crop_height = frame.crop_area_height();
    let source_y = (-offset * scale).max(0.0);
    let source_height = natural_height.min(crop_height * scale);
    let dest_height = crop_height.min(natural_height / scale + offset);
    let dest_y = bar_height + (crop_height - dest_height).max(0.0);

    let src = RectF::new(0.0, source_y, frame.width * scale, source_height);
    let dst = RectF::new(0.0, dest_y, frame.width, dest_height);
    draw_picture(&mut canvas, &source.pixels, src, dst, natural_width, natural_height);

    let bottom_bar_top = frame.bottom_bar_top();
    let secondary_size = SubtitleLine::Secondary.font_size() as f64;
    let lines = [
        (
            SubtitleLine::Primary,
            bottom_bar_top - SUBTITLE_PADDING - secondary_size - LINE_GAP,
        ),
        (SubtitleLine::Secondary, bottom_bar_top - SUBTITLE_PADDING),
    ];
    draw_subtitles(&mut canvas, state, fonts, &lines);

    let image = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&image)?;

    log::info!("Composed {}x{} image ({} bytes)", width, height, jpeg.len());
    Ok(CompositedOutput { image, jpeg })
}

fn fill_rect(canvas: &mut RgbaImage, rect: RectF, color: Rgba<u8>) {
    let (x, y, w, h) = rect.to_pixels();
    if w == 0 || h == 0 {
        return;
    }
    draw_filled_rect_mut(canvas, Rect::at(x as i32, y as i32).of_size(w, h), color);
}

/// Draw the `src` region of `picture` scaled into `dst`.
fn draw_picture(
    canvas: &mut RgbaImage,
    picture: &RgbaImage,
    src: RectF,
    dst: RectF,
    natural_width: f64,
    natural_height: f64,
) {
    let Some((src, dst)) = clip_draw_rects(src, dst, natural_width, natural_height) else {
        return;
    };

    let (sx, sy, sw, sh) = src.to_pixels();
    let (dx, dy, dw, dh) = dst.to_pixels();
    let sw = sw.min(picture.width().saturating_sub(sx as u32));
    let sh = sh.min(picture.height().saturating_sub(sy as u32));
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        return;
    }

    let region = imageops::crop_imm(picture, sx as u32, sy as u32, sw, sh).to_image();
    let scaled = if (sw, sh) == (dw, dh) {
        region
    } else {
        imageops::resize(&region, dw, dh, FilterType::Triangle)
    };
    imageops::overlay(canvas, &scaled, dx, dy);
}

/// Draw each non-empty line centered, with its bottom edge at the given y.
fn draw_subtitles(
    canvas: &mut RgbaImage,
    state: &EditorState,
    fonts: &SubtitleFonts,
    lines: &[(SubtitleLine, f64)],
) {
    let placed: Vec<(&FontArc, PxScale, &str, i32, i32)> = lines
        .iter()
        .filter_map(|&(line, bottom)| {
            let text = state.subtitles.text(line);
            if text.is_empty() {
                return None;
            }
            let font = fonts.for_line(line);
            let scale = PxScale::from(line.font_size());
            let (text_width, _) = text_size(scale, font, text);
            let x = (canvas.width() as i32 - text_width as i32) / 2;
            let top = bottom - font.as_scaled(scale).height() as f64;
            Some((font, scale, text, x, top.round() as i32))
        })
        .collect();

    if placed.is_empty() {
        return;
    }

    let mut shadow = RgbaImage::from_pixel(canvas.width(), canvas.height(), Rgba([0, 0, 0, 0]));
    for &(font, scale, text, x, y) in &placed {
        draw_text_mut(
            &mut shadow,
            SHADOW_COLOR,
            x + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            scale,
            font,
            text,
        );
    }
    let shadow = imageops::blur(&shadow, SHADOW_BLUR / 2.0);
    imageops::overlay(canvas, &shadow, 0, 0);

    for &(font, scale, text, x, y) in &placed {
        draw_text_mut(canvas, TEXT_COLOR, x, y, scale, font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::FrameDimensions;
    use crate::models::pan::PointerButton;
    use crate::models::session::{EditorEvent, SourceImage};
    use std::sync::Arc;

    fn fonts() -> SubtitleFonts {
        SubtitleFonts::bundled().unwrap()
    }

    fn loaded(picture: RgbaImage, viewport: f64) -> EditorState {
        EditorState::new().apply(EditorEvent::ImageLoaded {
            pixels: Arc::new(picture),
            viewport_width: viewport,
        })
    }

    /// Top half green, bottom half blue.
    fn two_tone(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, y| {
            if y < height / 2 {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    fn is_black(px: &image::Rgb<u8>) -> bool {
        px.0.iter().all(|&c| c == 0)
    }

    fn brightest(image: &RgbImage, rows: std::ops::Range<u32>) -> u8 {
        rows.flat_map(|y| (0..image.width()).map(move |x| (x, y)))
            .map(|(x, y)| *image.get_pixel(x, y).0.iter().min().unwrap())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_not_ready_without_picture() {
        let result = compose(&EditorState::new(), &fonts());
        assert!(matches!(result, Err(ComposeError::NotReady)));
    }

    #[test]
    fn test_empty_frame_rejected() {
        let state = EditorState {
            image: Some(SourceImage::new(Arc::new(RgbaImage::new(10, 10)), 0.0)),
            frame: FrameDimensions::ZERO,
            ..EditorState::default()
        };
        assert!(matches!(compose(&state, &fonts()), Err(ComposeError::EmptyFrame)));
    }

    #[test]
    fn test_bars_on_1000_wide_frame() {
        let picture = RgbaImage::from_pixel(1000, 1000, Rgba([255, 0, 0, 255]));
        let output = compose(&loaded(picture, 1920.0), &fonts()).unwrap();

        assert_eq!((output.width(), output.height()), (1000, 426));
        for x in [0, 500, 999] {
            assert!(is_black(output.image.get_pixel(x, 0)));
            assert!(is_black(output.image.get_pixel(x, 31)));
            assert_eq!(output.image.get_pixel(x, 32).0, [255, 0, 0]);
            assert_eq!(output.image.get_pixel(x, 393).0, [255, 0, 0]);
            assert!(is_black(output.image.get_pixel(x, 394)));
            assert!(is_black(output.image.get_pixel(x, 425)));
        }
    }

    #[test]
    fn test_offset_selects_picture_slice() {
        let state = loaded(two_tone(1000, 1000), 1920.0);
        let top = compose(&state, &fonts()).unwrap();
        assert_eq!(top.image.get_pixel(500, 200).0, [0, 255, 0]);

        let limits = state.pan_limits().unwrap();
        let raster = state.frame.raster();
        assert_eq!(raster.height, f64::from(top.height()));
        assert_eq!(limits.lower, raster.height - 1000.0 - raster.bar_height());
        let bottom_state = state
            .apply(EditorEvent::PointerDown {
                button: PointerButton::Primary,
                y: 100.0,
            })
            .apply(EditorEvent::PointerMove { y: -50_000.0 })
            .apply(EditorEvent::PointerUp);
        assert_eq!(bottom_state.offset_y, limits.lower);

        let bottom = compose(&bottom_state, &fonts()).unwrap();
        assert_eq!(bottom.image.get_pixel(500, 40).0, [0, 0, 255]);
        assert_eq!(bottom.image.get_pixel(500, 390).0, [0, 0, 255]);
    }

    #[test]
    fn test_scaled_picture_fills_window() {
        let picture = RgbaImage::from_pixel(2000, 1000, Rgba([200, 100, 50, 255]));
        let output = compose(&loaded(picture, 1000.0), &fonts()).unwrap();
        assert_eq!((output.width(), output.height()), (900, 383));
        let px = output.image.get_pixel(450, 190).0;
        assert_eq!(px, [200, 100, 50]);
    }

    #[test]
    fn test_subtitles_drawn_above_bottom_bar() {
        let picture = RgbaImage::from_pixel(1000, 1000, Rgba([0, 0, 0, 255]));
        let blank = loaded(picture, 1920.0);
        let without = compose(&blank, &fonts()).unwrap();
        assert_eq!(brightest(&without.image, 340..394), 0);

        let titled = blank
            .apply(EditorEvent::SubtitleEdited {
                line: SubtitleLine::Primary,
                text: "Bonjour".to_string(),
            })
            .apply(EditorEvent::SubtitleEdited {
                line: SubtitleLine::Secondary,
                text: "Hello there".to_string(),
            });
        let with = compose(&titled, &fonts()).unwrap();

        // secondary line band: 16px ending 10px above the bar at 394
        assert!(brightest(&with.image, 366..384) > 150);
        // primary line band: 20px ending 31px above the bar
        assert!(brightest(&with.image, 340..363) > 150);
        // bars stay untouched
        assert_eq!(brightest(&with.image, 394..426), 0);
        assert_eq!(brightest(&with.image, 0..32), 0);
    }

    #[test]
    fn test_subtitle_shadow_darkens_light_picture() {
        let picture = RgbaImage::from_pixel(1000, 1000, Rgba([255, 255, 255, 255]));
        let state = loaded(picture, 1920.0).apply(EditorEvent::SubtitleEdited {
            line: SubtitleLine::Secondary,
            text: "Shadow".to_string(),
        });
        let output = compose(&state, &fonts()).unwrap();

        let darkest = (366..390)
            .flat_map(|y| (0..1000).map(move |x| (x, y)))
            .map(|(x, y)| output.image.get_pixel(x, y).0[0])
            .min()
            .unwrap();
        assert!(darkest < 245);
    }

    #[test]
    fn test_jpeg_and_data_url() {
        let picture = RgbaImage::from_pixel(640, 480, Rgba([90, 90, 90, 255]));
        let output = compose(&loaded(picture, 1920.0), &fonts()).unwrap();

        assert_eq!(&output.jpeg[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&output.jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 272));

        let url = output.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let payload = general_purpose::STANDARD
            .decode(&url["data:image/jpeg;base64,".len()..])
            .unwrap();
        assert_eq!(payload, output.jpeg);
    }

    #[test]
    fn test_save_writes_jpeg() {
        let picture = RgbaImage::from_pixel(100, 100, Rgba([1, 2, 3, 255]));
        let output = compose(&loaded(picture, 1920.0), &fonts()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.jpg");
        output.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), output.jpeg);
    }

    #[test]
    fn test_output_is_snapshot() {
        let picture = RgbaImage::from_pixel(500, 500, Rgba([0, 0, 0, 255]));
        let state = loaded(picture, 1920.0);
        let first = compose(&state, &fonts()).unwrap();
        let _edited = state.apply(EditorEvent::SubtitleEdited {
            line: SubtitleLine::Secondary,
            text: "later".to_string(),
        });
        let again = compose(&state, &fonts()).unwrap();
        assert_eq!(first.image, again.image);
    }
}
