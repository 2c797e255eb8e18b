// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bilingual subtitle text.
//!
//! Each line has its own length limit. Over-length submissions are rejected
//! whole: the previous text stays and the line's warning flag is raised.

/// One of the two subtitle lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleLine {
    /// Chinese line, drawn above the secondary one.
    Primary,
    /// English line, drawn directly above the bottom bar.
    Secondary,
}

impl SubtitleLine {
    pub const ALL: [SubtitleLine; 2] = [SubtitleLine::Primary, SubtitleLine::Secondary];

    /// Maximum number of characters accepted for this line.
    pub fn max_chars(self) -> usize {
        match self {
            SubtitleLine::Primary => 30,
            SubtitleLine::Secondary => 50,
        }
    }

    /// Font size in pixels, used for both preview and export.
    pub fn font_size(self) -> f32 {
        match self {
            SubtitleLine::Primary => 20.0,
            SubtitleLine::Secondary => 16.0,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SubtitleLine::Primary => "中文字幕",
            SubtitleLine::Secondary => "English subtitle",
        }
    }

    pub fn warning(self) -> &'static str {
        match self {
            SubtitleLine::Primary => "文字多",
            SubtitleLine::Secondary => "Text too long",
        }
    }
}

/// Committed subtitle text plus the per-line warning flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubtitlePair {
    pub primary: String,
    pub secondary: String,
    pub primary_warning: bool,
    pub secondary_warning: bool,
}

impl SubtitlePair {
    pub fn text(&self, line: SubtitleLine) -> &str {
        match line {
            SubtitleLine::Primary => &self.primary,
            SubtitleLine::Secondary => &self.secondary,
        }
    }

    pub fn warning(&self, line: SubtitleLine) -> bool {
        match line {
            SubtitleLine::Primary => self.primary_warning,
            SubtitleLine::Secondary => self.secondary_warning,
        }
    }

    /// Submit new text for `line`, returning the resulting pair.
    pub fn submit(&self, line: SubtitleLine, text: &str) -> SubtitlePair {
        let mut next = self.clone();
        let accepted = text.chars().count() <= line.max_chars();

        let (slot, warning) = match line {
            SubtitleLine::Primary => (&mut next.primary, &mut next.primary_warning),
            SubtitleLine::Secondary => (&mut next.secondary, &mut next.secondary_warning),
        };

        if accepted {
            *slot = text.to_string();
            *warning = false;
        } else {
            log::warn!(
                "Rejected {:?} subtitle: {} characters exceeds limit of {}",
                line,
                text.chars().count(),
                line.max_chars()
            );
            *warning = true;
        }

        next
    }
}
