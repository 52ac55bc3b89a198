//! Theme: colors and glyphs for rendered replies.

use crate::buffer::{Modifiers, Rgb, Style};

/// Colors and glyphs used by the message and transcript widgets.
///
/// The defaults are the product palette: neon emerald accents on black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Page background.
    pub background: Rgb,
    /// Code block background.
    pub surface: Rgb,
    /// Primary accent: bullets, accent headings, inline code, cursor.
    pub accent: Rgb,
    /// Secondary accent: emphasised text, code content.
    pub accent_secondary: Rgb,
    /// Strong text and primary headings.
    pub text_strong: Rgb,
    /// Body text.
    pub text: Rgb,
    /// Labels and secondary headings.
    pub text_muted: Rgb,
    /// Glyph drawn after the last revealed character.
    pub cursor: &'static str,
    /// Bullet for unordered list items.
    pub bullet: &'static str,
    /// Marker in front of accent headings.
    pub heading_marker: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::from_u32(0x000000),
            surface: Rgb::from_u32(0x050505),
            accent: Rgb::from_u32(0x10B981),
            accent_secondary: Rgb::from_u32(0x34D399),
            text_strong: Rgb::from_u32(0xFFFFFF),
            text: Rgb::from_u32(0xD1D5DB),
            text_muted: Rgb::from_u32(0x9CA3AF),
            cursor: "▌",
            bullet: "→",
            heading_marker: "▍",
        }
    }
}

impl Theme {
    /// Body text.
    pub const fn body(&self) -> Style {
        Style::new(self.text, self.background)
    }

    /// `**bold**` runs.
    pub const fn bold(&self) -> Style {
        Style::new(self.text_strong, self.background).add(Modifiers::BOLD)
    }

    /// `*italic*` runs: drawn as emphasised color rather than slanted.
    pub const fn italic(&self) -> Style {
        Style::new(self.accent_secondary, self.background).add(Modifiers::BOLD)
    }

    /// `` `code` `` runs.
    pub const fn inline_code(&self) -> Style {
        Style::new(self.accent, self.surface)
    }

    /// Accent-colored text on the page background.
    pub const fn accent(&self) -> Style {
        Style::new(self.accent, self.background).add(Modifiers::BOLD)
    }

    /// Muted label text.
    pub const fn muted(&self) -> Style {
        Style::new(self.text_muted, self.background)
    }

    /// Code block content.
    pub const fn code(&self) -> Style {
        Style::new(self.accent_secondary, self.surface)
    }

    /// Code block header.
    pub const fn code_header(&self) -> Style {
        Style::new(self.text_muted, self.surface).add(Modifiers::BOLD)
    }
}
