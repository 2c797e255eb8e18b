// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fonts used to rasterize subtitles.
//!
//! The secondary (English) line uses the Latin font that ships with egui.
//! The primary (Chinese) line needs CJK glyphs, so a sans-serif CJK face is
//! looked up among the system fonts. A font file named in the settings
//! overrides either line.

use crate::config::{FontSource, FontsConfig};
use crate::models::subtitles::SubtitleLine;
use ab_glyph::{Font, FontArc, FontRef, FontVec};
use anyhow::{anyhow, Context, Result};
use fontdb::{Database, Family, Query, ID};

/// Name of the egui font used for Latin text.
const BUNDLED_FONT: &str = "Ubuntu-Light";

/// CJK families tried first, before any sans-serif face.
const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Source Han Sans SC",
    "Microsoft YaHei",
    "PingFang SC",
    "SimHei",
    "WenQuanYi Micro Hei",
    "WenQuanYi Zen Hei",
    "Droid Sans Fallback",
];

/// Family name fragments that mark a face worth checking for CJK coverage.
const CJK_NAME_HINTS: &[&str] = &["cjk", "han sans", "hei", "yahei", "pingfang", "fallback"];

/// A face must have a glyph for this character to set the primary line.
const CJK_SAMPLE: char = '你';

/// Raw bytes of one font face, kept so egui can be given the same face.
#[derive(Clone)]
pub struct FontFace {
    pub name: String,
    pub bytes: Vec<u8>,
    pub index: u32,
}

impl FontFace {
    fn from_source(source: &FontSource) -> Result<Self> {
        let bytes = std::fs::read(&source.path)
            .with_context(|| format!("Cannot read font {}", source.path.display()))?;
        Ok(Self {
            name: source.path.display().to_string(),
            bytes,
            index: source.index,
        })
    }

    fn to_font(&self) -> Result<FontArc> {
        let font = FontVec::try_from_vec_and_index(self.bytes.clone(), self.index)
            .with_context(|| format!("Invalid font {}", self.name))?;
        Ok(FontArc::new(font))
    }

    fn covers(&self, c: char) -> bool {
        FontRef::try_from_slice_and_index(&self.bytes, self.index)
            .map(|font| font.glyph_id(c).0 != 0)
            .unwrap_or(false)
    }
}

/// One font per subtitle line.
pub struct SubtitleFonts {
    primary: FontArc,
    secondary: FontArc,
    /// Faces that are not part of egui's defaults, registered with egui.
    extra_faces: Vec<FontFace>,
}

impl SubtitleFonts {
    /// Both lines set in the bundled egui font.
    pub fn bundled() -> Result<Self> {
        let font = bundled_font()?;
        Ok(Self {
            primary: font.clone(),
            secondary: font,
            extra_faces: Vec::new(),
        })
    }

    /// Fonts from the settings, then a system CJK face for the primary
    /// line, then the bundled font.
    pub fn from_config(config: &FontsConfig) -> Result<Self> {
        let primary_face = match config.primary {
            Some(ref source) => Some(FontFace::from_source(source)?),
            None => {
                let face = system_cjk_face();
                if face.is_none() {
                    log::warn!("No CJK system font found, Chinese subtitles will not render");
                }
                face
            }
        };
        let secondary_face = match config.secondary {
            Some(ref source) => Some(FontFace::from_source(source)?),
            None => None,
        };

        let bundled = bundled_font()?;
        let pick = |face: &Option<FontFace>| -> Result<FontArc> {
            match face {
                Some(face) => {
                    let font = face.to_font()?;
                    log::info!("Using subtitle font {}", face.name);
                    Ok(font)
                }
                None => Ok(bundled.clone()),
            }
        };

        Ok(Self {
            primary: pick(&primary_face)?,
            secondary: pick(&secondary_face)?,
            extra_faces: primary_face.into_iter().chain(secondary_face).collect(),
        })
    }

    pub fn for_line(&self, line: SubtitleLine) -> &FontArc {
        match line {
            SubtitleLine::Primary => &self.primary,
            SubtitleLine::Secondary => &self.secondary,
        }
    }
}

fn bundled_font() -> Result<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let data = definitions
        .font_data
        .get(BUNDLED_FONT)
        .ok_or_else(|| anyhow!("Bundled font {} is missing", BUNDLED_FONT))?;
    FontArc::try_from_vec(data.font.to_vec()).context("Bundled font is invalid")
}

/// Find a system face that can set Chinese text.
pub fn system_cjk_face() -> Option<FontFace> {
    let mut db = Database::new();
    db.load_system_fonts();
    find_cjk_face(&db)
}

fn find_cjk_face(db: &Database) -> Option<FontFace> {
    let mut families: Vec<Family> = CJK_FAMILIES.iter().map(|&name| Family::Name(name)).collect();
    families.push(Family::SansSerif);
    let query = Query {
        families: &families,
        ..Query::default()
    };

    // The sans-serif fallback is often a Latin face, so coverage decides
    let hinted = db.faces().filter(|info| {
        info.families.iter().any(|(name, _)| {
            let name = name.to_lowercase();
            CJK_NAME_HINTS.iter().any(|hint| name.contains(hint))
        })
    });
    db.query(&query)
        .into_iter()
        .chain(hinted.map(|info| info.id))
        .filter_map(|id| load_face(db, id))
        .find(|face| face.covers(CJK_SAMPLE))
}

fn load_face(db: &Database, id: ID) -> Option<FontFace> {
    let name = db.face(id)?.families.first()?.0.clone();
    db.with_face_data(id, |data, index| FontFace {
        name,
        bytes: data.to_vec(),
        index,
    })
}

/// Register the subtitle faces with egui as fallbacks, so the subtitle
/// inputs, placeholders and warnings can show their glyphs.
pub fn install_egui_fonts(ctx: &egui::Context, fonts: &SubtitleFonts) {
    if fonts.extra_faces.is_empty() {
        return;
    }

    let mut definitions = egui::FontDefinitions::default();
    for face in &fonts.extra_faces {
        let mut data = egui::FontData::from_owned(face.bytes.clone());
        data.index = face.index;
        definitions.font_data.insert(face.name.clone(), data);
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            definitions
                .families
                .entry(family)
                .or_default()
                .push(face.name.clone());
        }
        log::debug!("Registered {} with egui", face.name);
    }
    ctx.set_fonts(definitions);
}
