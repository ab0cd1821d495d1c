//! # Font Management
//!
//! The standard PDF fonts (Helvetica, Times, Courier) need no embedding and
//! are always available. Custom TrueType fonts are registered from the
//! document config, parsed with ttf-parser for metrics, and embedded whole
//! by the PDF writer.

pub mod metrics;

use std::collections::HashMap;
use std::sync::Arc;

pub use metrics::StandardFontMetrics;

use crate::config::FontEntry;
use crate::error::GridError;
use crate::image_loader::read_source_bytes;

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

impl FontKey {
    pub fn new(family: &str, weight: u32, italic: bool) -> Self {
        Self {
            family: family.to_string(),
            weight: snap_weight(weight),
            italic,
        }
    }
}

fn snap_weight(weight: u32) -> u32 {
    if weight >= 600 {
        700
    } else {
        400
    }
}

#[derive(Debug, Clone)]
pub enum FontData {
    /// One of the standard PDF fonts. No embedding needed.
    Standard(StandardFont),
    /// A TrueType/OpenType font that is embedded in the output.
    Custom {
        data: Arc<Vec<u8>>,
        metrics: CustomFontMetrics,
    },
}

/// Metrics parsed from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
    pub ascender: i16,
    pub descender: i16,
    /// Maps characters to glyph IDs in the font.
    pub glyph_ids: HashMap<char, u16>,
}

impl CustomFontMetrics {
    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    pub fn from_font_data(data: &[u8]) -> Result<Self, String> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| e.to_string())?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut glyph_ids = HashMap::new();

        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|code| {
                    let Some(ch) = char::from_u32(code) else {
                        return;
                    };
                    if let Some(gid) = subtable.glyph_index(code) {
                        advance_widths.insert(ch, face.glyph_hor_advance(gid).unwrap_or(0));
                        glyph_ids.insert(ch, gid.0);
                    }
                });
            }
        }

        if glyph_ids.is_empty() {
            return Err("font has no Unicode character map".to_string());
        }

        let default_advance = advance_widths
            .get(&' ')
            .copied()
            .filter(|w| *w > 0)
            .unwrap_or(units_per_em / 2);

        Ok(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
            ascender: face.ascender(),
            descender: face.descender(),
            glyph_ids,
        })
    }
}

/// The standard PDF fonts this engine measures and references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => metrics::HELVETICA_BOLD,
            Self::TimesRoman => metrics::TIMES,
            Self::TimesItalic => metrics::TIMES_ITALIC,
            Self::TimesBold => metrics::TIMES_BOLD,
            Self::TimesBoldItalic => metrics::TIMES_BOLD_ITALIC,
            Self::Courier | Self::CourierBold | Self::CourierOblique | Self::CourierBoldOblique => {
                metrics::COURIER
            }
        }
    }
}

/// Maps family + weight + style to font data.
pub struct FontRegistry {
    fonts: HashMap<FontKey, FontData>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let standard_mappings = [
            (("Helvetica", 400, false), StandardFont::Helvetica),
            (("Helvetica", 700, false), StandardFont::HelveticaBold),
            (("Helvetica", 400, true), StandardFont::HelveticaOblique),
            (("Helvetica", 700, true), StandardFont::HelveticaBoldOblique),
            (("Times", 400, false), StandardFont::TimesRoman),
            (("Times", 700, false), StandardFont::TimesBold),
            (("Times", 400, true), StandardFont::TimesItalic),
            (("Times", 700, true), StandardFont::TimesBoldItalic),
            (("Courier", 400, false), StandardFont::Courier),
            (("Courier", 700, false), StandardFont::CourierBold),
            (("Courier", 400, true), StandardFont::CourierOblique),
            (("Courier", 700, true), StandardFont::CourierBoldOblique),
        ];

        let fonts = standard_mappings
            .into_iter()
            .map(|((family, weight, italic), font)| {
                (FontKey::new(family, weight, italic), FontData::Standard(font))
            })
            .collect();

        Self { fonts }
    }

    /// Standard family names that are spelled differently by callers.
    fn alias(family: &str) -> &str {
        match family.to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans-serif" => "Helvetica",
            "times" | "times-roman" | "times new roman" | "serif" => "Times",
            "courier" | "courier new" | "monospace" => "Courier",
            _ => family,
        }
    }

    /// The registered key that text in `family` will actually be drawn
    /// with, falling back to Helvetica for unknown families.
    pub fn resolve_key(&self, family: &str, weight: u32, italic: bool) -> FontKey {
        let key = FontKey::new(family, weight, italic);
        if self.fonts.contains_key(&key) {
            return key;
        }
        let aliased = FontKey::new(Self::alias(family), weight, italic);
        if self.fonts.contains_key(&aliased) {
            return aliased;
        }
        // A custom family registered only in its regular face.
        let regular = FontKey::new(family, 400, false);
        if self.fonts.contains_key(&regular) {
            return regular;
        }
        log::warn!("font family '{family}' is not registered, falling back to Helvetica");
        FontKey::new("Helvetica", weight, italic)
    }

    pub fn get(&self, key: &FontKey) -> Option<&FontData> {
        self.fonts.get(key)
    }

    /// Register a custom font from raw TrueType bytes.
    pub fn register(
        &mut self,
        family: &str,
        weight: u32,
        italic: bool,
        data: Vec<u8>,
    ) -> Result<(), GridError> {
        let metrics = CustomFontMetrics::from_font_data(&data).map_err(|e| {
            GridError::InvalidDocumentConfig(format!("font '{family}' could not be parsed: {e}"))
        })?;
        log::debug!(
            "registered font '{family}' weight {weight}{} ({} glyphs)",
            if italic { " italic" } else { "" },
            metrics.glyph_ids.len()
        );
        self.fonts.insert(
            FontKey::new(family, weight, italic),
            FontData::Custom {
                data: Arc::new(data),
                metrics,
            },
        );
        Ok(())
    }

    /// Register a font from a config entry, reading its source.
    pub fn register_entry(&mut self, entry: &FontEntry) -> Result<(), GridError> {
        let data = read_source_bytes(&entry.src).map_err(|e| {
            GridError::InvalidDocumentConfig(format!(
                "font '{}' could not be read: {e}",
                entry.family
            ))
        })?;
        self.register(&entry.family, entry.weight, entry.italic, data)
    }
}

/// Shared font context used by measurement and PDF serialization.
#[derive(Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context with every font in `entries` registered.
    pub fn with_fonts(entries: &[FontEntry]) -> Result<Self, GridError> {
        let mut ctx = Self::new();
        for entry in entries {
            ctx.registry.register_entry(entry)?;
        }
        Ok(ctx)
    }

    pub fn resolve_key(&self, family: &str, weight: u32, italic: bool) -> FontKey {
        self.registry.resolve_key(family, weight, italic)
    }

    pub fn font_data(&self, key: &FontKey) -> &FontData {
        static FALLBACK: FontData = FontData::Standard(StandardFont::Helvetica);
        self.registry.get(key).unwrap_or(&FALLBACK)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, key: &FontKey, font_size: f64) -> f64 {
        match self.font_data(key) {
            FontData::Standard(font) => font.metrics().measure_string(text, font_size),
            FontData::Custom { metrics, .. } => {
                text.chars().map(|ch| metrics.char_width(ch, font_size)).sum()
            }
        }
    }

    /// Distance from the top of a line box to the baseline, in points.
    pub fn ascent(&self, key: &FontKey, font_size: f64) -> f64 {
        match self.font_data(key) {
            FontData::Standard(font) => font.metrics().ascent as f64 * font_size / 1000.0,
            FontData::Custom { metrics, .. } => {
                metrics.ascender as f64 / metrics.units_per_em as f64 * font_size
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_space_width() {
        let ctx = FontContext::new();
        let key = ctx.resolve_key("Helvetica", 400, false);
        assert!((ctx.measure_string(" ", &key, 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn bold_is_wider() {
        let ctx = FontContext::new();
        let regular = ctx.resolve_key("Helvetica", 400, false);
        let bold = ctx.resolve_key("Helvetica", 700, false);
        assert!(
            ctx.measure_string("Hamburg", &bold, 12.0)
                > ctx.measure_string("Hamburg", &regular, 12.0)
        );
    }

    #[test]
    fn unknown_family_falls_back_to_helvetica() {
        let ctx = FontContext::new();
        let key = ctx.resolve_key("NoSuchFont", 400, false);
        assert_eq!(key, FontKey::new("Helvetica", 400, false));
    }

    #[test]
    fn arial_aliases_helvetica() {
        let ctx = FontContext::new();
        let key = ctx.resolve_key("Arial", 800, true);
        assert_eq!(key, FontKey::new("Helvetica", 700, true));
        assert!(matches!(
            ctx.font_data(&key),
            FontData::Standard(StandardFont::HelveticaBoldOblique)
        ));
    }

    #[test]
    fn invalid_custom_font_is_config_error() {
        let mut registry = FontRegistry::new();
        let err = registry
            .register("Broken", 400, false, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidDocumentConfig(_)));
    }

    #[test]
    fn unreadable_font_entry_is_config_error() {
        let entry = FontEntry {
            family: "Missing".into(),
            src: "/nonexistent/font.ttf".into(),
            weight: 400,
            italic: false,
        };
        assert!(matches!(
            FontContext::with_fonts(&[entry]),
            Err(GridError::InvalidDocumentConfig(_))
        ));
    }

    #[test]
    fn ascent_scales_with_size() {
        let ctx = FontContext::new();
        let key = FontKey::new("Helvetica", 400, false);
        assert!((ctx.ascent(&key, 10.0) - 7.18).abs() < 1e-9);
    }
}
