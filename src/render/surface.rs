//! The drawing capability the host provides.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let channel = |text: &str| u8::from_str_radix(text, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            3 => {
                let mut parts = digits.chars().map(|c| {
                    let value = c.to_digit(16)? as u8;
                    Some(value * 16 + value)
                });
                Some(Self::rgb(parts.next()??, parts.next()??, parts.next()??))
            }
            _ => None,
        }
    }
}

/// CSS colour text, `rgba(r, g, b, a)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// A 2D canvas. Text is positioned by its top edge.
pub trait DrawSurface {
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba);
    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, color: Rgba);
    fn measure_text(&self, text: &str) -> TextMetrics;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCall {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
        color: Rgba,
    },
}

/// Surface that only records what was drawn. Text is measured with a fixed
/// advance per character.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    char_width: f64,
    line_height: f64,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            char_width: 7.0,
            line_height: 16.0,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn fills_with(&self, color: Rgba) -> Vec<(f64, f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color: fill,
                } if *fill == color => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.calls.push(DrawCall::StrokeRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, color: Rgba) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
            color,
        });
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f64 * self.char_width,
            height: self.line_height,
        }
    }
}
