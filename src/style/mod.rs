//! # Style System
//!
//! The small set of visual properties an element can carry: color,
//! alignment, font weight and slant. Input styles are all-optional; they are
//! resolved against the document's [`BaseStyle`] once, when elements are
//! prepared, so the renderer only ever sees concrete values.

use serde::{Deserialize, Serialize};

/// An RGB color with 8-bit channels.
///
/// Channels are clamped to `[0, 255]` whenever a color is built from wider
/// integers, including during deserialization. JSON input may also give a
/// `"#rrggbb"` or `"#rgb"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Channels { r: i64, g: i64, b: i64 },
    Hex(String),
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        match raw {
            RawColor::Channels { r, g, b } => Color::clamped(r, g, b),
            RawColor::Hex(hex) => Color::hex(&hex),
        }
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from arbitrary integers, clamping each channel.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let c = |v: i64| v.clamp(0, 255) as u8;
        Self {
            r: c(r),
            g: c(g),
            b: c(b),
        }
    }

    /// Parse `#rrggbb` or `#rgb`. Anything else is black.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Self::BLACK;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        match hex.len() {
            3 => Self::rgb(
                channel(&hex[0..1].repeat(2)),
                channel(&hex[1..2].repeat(2)),
                channel(&hex[2..3].repeat(2)),
            ),
            6 => Self::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
            _ => Self::BLACK,
        }
    }

    /// Channels as PDF color operands in `0.0..=1.0`.
    pub fn unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    #[default]
    #[serde(alias = "left")]
    Start,
    Center,
    #[serde(alias = "right")]
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Numeric weight used for font lookup.
    pub fn value(&self) -> u32 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Bold => 700,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSlant {
    #[default]
    Upright,
    Italic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Document-wide defaults applied to every text element that leaves a
/// property unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseStyle {
    pub font_family: String,
    /// Font size in points.
    pub font_size: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    pub color: Color,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
            line_height: 1.2,
            color: Color::BLACK,
        }
    }
}

/// Style properties of a text element as written by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    /// Font size in points.
    pub size: Option<f64>,
    pub weight: Option<FontWeight>,
    pub slant: Option<FontSlant>,
    pub color: Option<Color>,
    pub align: Option<Align>,
}

impl TextStyle {
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }

    pub fn italic(mut self) -> Self {
        self.slant = Some(FontSlant::Italic);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    /// Fill every unset property from the document base style.
    pub fn resolve(&self, base: &BaseStyle) -> ResolvedTextStyle {
        ResolvedTextStyle {
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| base.font_family.clone()),
            font_size: self.size.unwrap_or(base.font_size),
            weight: self.weight.unwrap_or_default(),
            slant: self.slant.unwrap_or_default(),
            color: self.color.unwrap_or(base.color),
            align: self.align.unwrap_or_default(),
            line_height: base.line_height,
        }
    }
}

/// Text style with every value concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub color: Color,
    pub align: Align,
    pub line_height: f64,
}

impl ResolvedTextStyle {
    pub fn italic(&self) -> bool {
        matches!(self.slant, FontSlant::Italic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels_are_clamped() {
        assert_eq!(Color::clamped(300, -5, 128), Color::rgb(255, 0, 128));
        let c: Color = serde_json::from_str(r#"{"r": 999, "g": -1, "b": 95}"#).unwrap();
        assert_eq!(c, Color::rgb(255, 0, 95));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Color::hex("#ff78da"), Color::rgb(255, 120, 218));
        assert_eq!(Color::hex("fff"), Color::WHITE);
        assert_eq!(Color::hex("nope"), Color::BLACK);
        assert_eq!(Color::hex("é1"), Color::BLACK);
        assert_eq!(Color::hex("#ééé"), Color::BLACK);
    }

    #[test]
    fn hex_color_from_json() {
        let c: Color = serde_json::from_str(r##""#ff78da""##).unwrap();
        assert_eq!(c, Color::rgb(255, 120, 218));
        let c: Color = serde_json::from_str(r#""ü1""#).unwrap();
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn resolve_applies_base_defaults() {
        let base = BaseStyle::default();
        let resolved = TextStyle::default().resolve(&base);
        assert_eq!(resolved.font_family, "Helvetica");
        assert!((resolved.font_size - 10.0).abs() < 1e-9);
        assert_eq!(resolved.color, Color::BLACK);
        assert_eq!(resolved.align, Align::Start);
        assert_eq!(resolved.weight, FontWeight::Normal);
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let base = BaseStyle::default();
        let style = TextStyle::default()
            .size(14.0)
            .bold()
            .italic()
            .align(Align::Center)
            .color(Color::rgb(95, 95, 95));
        let resolved = style.resolve(&base);
        assert!((resolved.font_size - 14.0).abs() < 1e-9);
        assert_eq!(resolved.weight, FontWeight::Bold);
        assert!(resolved.italic());
        assert_eq!(resolved.align, Align::Center);
        assert_eq!(resolved.color, Color::rgb(95, 95, 95));
    }

    #[test]
    fn align_accepts_left_right_aliases() {
        let a: Align = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(a, Align::End);
        let a: Align = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(a, Align::Center);
    }
}
