//! Card content and size measurement.
//!
//! A card is the drawable face of a node: a short list of text lines in a
//! monospace font. Measurement only depends on those lines, so the same
//! metrics give identical sizes in the canvas and in tests.

use eframe::egui;

use super::node::NodeKind;
use super::value::Value;

/// Lines longer than this are clipped before measuring.
const MAX_LINE_CHARS: usize = 48;

/// Monospace advance relative to font size (egui's default Hack font).
const GLYPH_ADVANCE: f32 = 0.62;
const LINE_SPACING: f32 = 1.4;

/// Role of a line on a card (drives its color).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Extension label or placeholder text
    Title,
    /// `key: scalar`
    Scalar,
    /// `key: {n}` / `key: [n]` - has a connected child card
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub text: String,
    pub role: LineRole,
}

impl CardLine {
    fn new(text: impl Into<String>, role: LineRole) -> Self {
        let mut text = text.into();
        if text.chars().count() > MAX_LINE_CHARS {
            text = text.chars().take(MAX_LINE_CHARS - 1).collect();
            text.push('…');
        }
        Self { text, role }
    }
}

/// Text lines shown on a card of the given kind.
pub fn card_lines(kind: &NodeKind) -> Vec<CardLine> {
    match kind {
        NodeKind::Object { value } => match value {
            Value::Keyed(map) if map.is_empty() => vec![CardLine::new("{}", LineRole::Scalar)],
            Value::List(items) if items.is_empty() => vec![CardLine::new("[]", LineRole::Scalar)],
            Value::Keyed(_) | Value::List(_) => value
                .entries()
                .into_iter()
                .map(|(key, entry)| {
                    let role = if entry.is_container() {
                        LineRole::Nested
                    } else {
                        LineRole::Scalar
                    };
                    CardLine::new(format!("{}: {}", key, entry.preview()), role)
                })
                .collect(),
            scalar => vec![CardLine::new(scalar.preview(), LineRole::Scalar)],
        },
        NodeKind::Extension { label } => vec![CardLine::new(label.clone(), LineRole::Title)],
        NodeKind::Empty => vec![CardLine::new("empty", LineRole::Title)],
    }
}

/// Card measurement parameters, in scene units.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardMetrics {
    pub font_size: f32,
    pub char_width: f32,
    pub line_height: f32,
    pub padding: egui::Vec2,
    pub min_width: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self::for_font_size(12.0)
    }
}

impl CardMetrics {
    pub fn for_font_size(font_size: f32) -> Self {
        Self {
            font_size,
            char_width: font_size * GLYPH_ADVANCE,
            line_height: font_size * LINE_SPACING,
            padding: egui::vec2(10.0, 8.0),
            min_width: 60.0,
        }
    }

    /// Size of a card showing `lines`.
    pub fn measure(&self, lines: &[CardLine]) -> egui::Vec2 {
        let widest = lines
            .iter()
            .map(|l| l.text.chars().count())
            .max()
            .unwrap_or(0);
        let width = (widest as f32 * self.char_width + self.padding.x * 2.0).max(self.min_width);
        let height = lines.len().max(1) as f32 * self.line_height + self.padding.y * 2.0;
        egui::vec2(width, height)
    }
}
