//! Paint context widgets record their draw commands into.

use crate::widgets::font::{Font, HorizontalAlignment, VerticalAlignment};
use crate::widgets::{Color, Rect};

use super::commands::{DrawCommand, Shadow};

/// Collects draw commands for one frame.
///
/// Coordinates are absolute logical pixels; widgets place themselves with
/// `Widget::set_origin` before painting. Clips nest: every `push_clip` must
/// be matched by a `pop_clip`.
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_rounded_rect_with_shadow(
        &mut self,
        rect: Rect,
        color: Color,
        radius: f32,
        shadow: Shadow,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
            shadow: Some(shadow),
        });
    }

    pub fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        color: Color,
        font: &Font,
        halign: HorizontalAlignment,
        valign: VerticalAlignment,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            rect,
            color,
            font: font.clone(),
            halign,
            valign,
        });
    }

    pub fn push_clip(&mut self, rect: Rect, radius: f32) {
        self.clip_stack.push(rect);
        self.commands.push(DrawCommand::PushClip { rect, radius });
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.commands.push(DrawCommand::PopClip);
        } else {
            log::warn!("pop_clip called with an empty clip stack");
        }
    }

    /// Innermost active clip, if any.
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.clip_stack.clear();
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_stack_balances() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert_eq!(ctx.current_clip(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        ctx.pop_clip();
        ctx.pop_clip();
        assert_eq!(ctx.current_clip(), None);
        assert_eq!(ctx.commands().len(), 2);
        assert_eq!(ctx.commands()[1], DrawCommand::PopClip);
    }

    #[test]
    fn test_text_command_records_attributes() {
        let mut ctx = PaintContext::new();
        let font = Font::default().size(18.0);
        ctx.draw_text(
            "Hello",
            Rect::new(1.0, 2.0, 30.0, 20.0),
            Color::WHITE,
            &font,
            HorizontalAlignment::Center,
            VerticalAlignment::Top,
        );
        match &ctx.commands()[0] {
            DrawCommand::Text {
                text, font, halign, ..
            } => {
                assert_eq!(text, "Hello");
                assert_eq!(font.size, 18.0);
                assert_eq!(*halign, HorizontalAlignment::Center);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(ctx.take_commands().len(), 1);
        assert!(ctx.commands().is_empty());
    }
}
