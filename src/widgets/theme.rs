//! Default metrics and colors handed to widgets at construction.
//!
//! The host's theming system owns the real values; widgets only read a
//! snapshot when they are built.

use crate::animation::Transition;
use crate::widgets::font::Font;
use crate::widgets::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub font: Font,
    /// Height of one list line including padding
    pub line_height: f32,
    pub padding: f32,
    pub text_color: Color,
    pub row_background: Color,
    pub overlay_background: Color,
    /// Color the overlay dims toward as shade increases
    pub dim_color: Color,
    pub corner_radius: f32,
    pub shadow_color: Color,
    pub shadow_blur: f32,
    pub shadow_offset: (f32, f32),
    /// Transition used by overlay show/hide
    pub transition: Transition,
}

impl Theme {
    /// Default slot thickness: one line minus vertical padding.
    pub fn text_height(&self) -> f32 {
        self.line_height - 2.0 * self.padding
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn overlay_background(mut self, color: Color) -> Self {
        self.overlay_background = color;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font: Font::default(),
            line_height: 32.0,
            padding: 6.0,
            text_color: Color::from_hex(0xE6E6EB),
            row_background: Color::rgba(0.12, 0.12, 0.16, 1.0),
            overlay_background: Color::rgba(0.16, 0.16, 0.21, 0.96),
            dim_color: Color::BLACK,
            corner_radius: 8.0,
            shadow_color: Color::rgba(0.0, 0.0, 0.0, 0.45),
            shadow_blur: 12.0,
            shadow_offset: (0.0, 4.0),
            transition: Transition::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_height_subtracts_padding() {
        let theme = Theme::default().line_height(40.0).padding(5.0);
        assert_eq!(theme.text_height(), 30.0);
    }
}
