//! Font and text alignment attributes shared by pooled text slots.

use cosmic_text::{Attrs, Family, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    /// Custom font by name
    Name(String),
}

impl FontFamily {
    pub fn to_cosmic(&self) -> Family<'_> {
        match self {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Name(name) => Family::Name(name),
        }
    }
}

/// Font weight on a 100-900 scale, matching CSS font-weight values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const BOLD: Self = Self(700);

    pub fn to_cosmic(self) -> Weight {
        Weight(self.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Family, weight and pixel size of a text slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
}

impl Font {
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            weight: FontWeight::NORMAL,
            size,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Line height used when a slot has no explicit thickness.
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    pub fn attrs(&self) -> Attrs<'_> {
        Attrs::new()
            .family(self.family.to_cosmic())
            .weight(self.weight.to_cosmic())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 14.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl HorizontalAlignment {
    /// Offset of content of width `content` inside `available`.
    pub fn offset(self, available: f32, content: f32) -> f32 {
        let free = (available - content).max(0.0);
        match self {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => free / 2.0,
            HorizontalAlignment::Right => free,
        }
    }
}

impl VerticalAlignment {
    pub fn offset(self, available: f32, content: f32) -> f32 {
        let free = (available - content).max(0.0);
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => free / 2.0,
            VerticalAlignment::Bottom => free,
        }
    }
}
