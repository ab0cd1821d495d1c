//! # PDF Serializer
//!
//! Takes the laid-out pages from the allocator and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. Pages arrive as flat lists of draw
//! commands in document units with a top-left origin; the writer scales them
//! to points and flips the y axis.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- Catalog
//! 2 0 obj ... endobj  <- Pages tree
//! ...                 <- fonts, images, content streams, pages, Info
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! ## Font Embedding
//!
//! Standard PDF fonts (Helvetica, Times, Courier) use simple Type1 references
//! with WinAnsiEncoding. Custom TrueType fonts are embedded whole as
//! CIDFontType2 with Identity-H encoding, producing 5 PDF objects per font:
//! FontFile2, FontDescriptor, CIDFont, ToUnicode CMap, and the root Type0
//! dictionary.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::config::{Metadata, Unit};
use crate::error::GridError;
use crate::font::{FontContext, FontData, FontKey};
use crate::image_loader::{ImagePixelData, SourceImage};
use crate::layout::LayoutPage;
use crate::render::DrawCommand;
use crate::style::{Color, LineStyle};

const PAGE_NUMBER: &str = "{{pageNumber}}";
const TOTAL_PAGES: &str = "{{totalPages}}";

pub struct PdfWriter {
    compress: bool,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Font key -> Type1 or Type0 object id, indexed as /F0, /F1, ...
    font_objects: Vec<(FontKey, usize)>,
    /// Character to glyph id maps for embedded fonts.
    custom_gids: HashMap<FontKey, HashMap<char, u16>>,
    /// Image store id -> XObject object id.
    image_objects: BTreeMap<usize, usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        let id = self.objects.len();
        self.objects.push(PdfObject { data });
        id
    }
}

/// Page geometry in points.
struct PageSpace {
    k: f64,
    height: f64,
}

impl PageSpace {
    fn x(&self, x: f64) -> f64 {
        x * self.k
    }

    /// Flip a top-origin y coordinate.
    fn y(&self, y: f64) -> f64 {
        self.height - y * self.k
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deflate content streams, image data and font files.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(
        &self,
        pages: &[LayoutPage],
        unit: Unit,
        metadata: &Metadata,
        fonts: &FontContext,
    ) -> Result<Vec<u8>, GridError> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            custom_gids: HashMap::new(),
            image_objects: BTreeMap::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        builder.push(Vec::new());
        builder.push(Vec::new());
        builder.push(Vec::new());

        self.register_fonts(&mut builder, pages, fonts)?;
        self.register_images(&mut builder, pages)?;

        let total = pages.len();
        let font_resources = Self::build_font_resource_dict(&builder.font_objects);
        let mut page_obj_ids: Vec<usize> = Vec::with_capacity(total);

        for (page_idx, page) in pages.iter().enumerate() {
            let space = PageSpace {
                k: unit.points(),
                height: page.height * unit.points(),
            };
            let content = self.build_content_stream(page, &space, &builder, page_idx + 1, total);
            let content_obj_id = builder.push(self.stream_object("", content.as_bytes()));

            let xobjects = Self::build_xobject_resource_dict(page, &builder);
            let resources = if xobjects.is_empty() {
                format!("/Font << {font_resources} >>")
            } else {
                format!("/Font << {font_resources} >> /XObject << {xobjects} >>")
            };
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                num(page.width * space.k),
                num(space.height),
                content_obj_id,
                resources
            );
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.push(Self::build_info_dict(metadata).into_bytes());

        log::debug!(
            "serialized {} pages, {} fonts, {} images",
            total,
            builder.font_objects.len(),
            builder.image_objects.len()
        );
        Ok(Self::serialize(&builder, info_obj_id))
    }

    /// Wrap `data` in a stream object, deflating it when compression is on.
    /// `extra` is spliced into the stream dictionary.
    fn stream_object(&self, extra: &str, data: &[u8]) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        if self.compress {
            let compressed = compress_to_vec_zlib(data, 6);
            let _ = write!(
                out,
                "<< /Length {}{} /Filter /FlateDecode >>\nstream\n",
                compressed.len(),
                extra
            );
            out.extend_from_slice(&compressed);
        } else {
            let _ = write!(out, "<< /Length {}{} >>\nstream\n", data.len(), extra);
            out.extend_from_slice(data);
        }
        out.extend_from_slice(b"\nendstream");
        out
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        page: &LayoutPage,
        space: &PageSpace,
        builder: &PdfBuilder,
        page_number: usize,
        total_pages: usize,
    ) -> String {
        let mut stream = String::new();
        for command in &page.commands {
            match command {
                DrawCommand::Fill { rect, color } => {
                    let _ = writeln!(
                        stream,
                        "{} rg\n{} {} {} {} re f",
                        rgb(*color),
                        num(space.x(rect.x)),
                        num(space.y(rect.y + rect.height)),
                        num(rect.width * space.k),
                        num(rect.height * space.k)
                    );
                }

                DrawCommand::Stroke {
                    from,
                    to,
                    thickness,
                    color,
                    style,
                } => {
                    let dash = match style {
                        LineStyle::Solid => "[] 0 d",
                        LineStyle::Dashed => "[3 1.5] 0 d",
                    };
                    let _ = writeln!(
                        stream,
                        "q\n{} RG\n{} w\n{}\n{} {} m\n{} {} l\nS\nQ",
                        rgb(*color),
                        num(thickness * space.k),
                        dash,
                        num(space.x(from.0)),
                        num(space.y(from.1)),
                        num(space.x(to.0)),
                        num(space.y(to.1))
                    );
                }

                DrawCommand::Text {
                    lines,
                    font,
                    size,
                    color,
                } => {
                    let idx = Self::font_index(font, &builder.font_objects);
                    let gids = builder.custom_gids.get(font);
                    let _ = writeln!(stream, "BT\n/F{} {} Tf\n{} rg", idx, num(*size), rgb(*color));
                    for line in lines {
                        let text = substitute_placeholders(&line.text, page_number, total_pages);
                        let encoded = match gids {
                            Some(map) => encode_glyphs(&text, map),
                            None => format!("({})", encode_winansi(&text)),
                        };
                        let _ = writeln!(
                            stream,
                            "1 0 0 1 {} {} Tm\n{} Tj",
                            num(space.x(line.x)),
                            num(space.y(line.baseline)),
                            encoded
                        );
                    }
                    stream.push_str("ET\n");
                }

                DrawCommand::Image { image, rect } => {
                    if builder.image_objects.contains_key(&image.id) {
                        let _ = writeln!(
                            stream,
                            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ",
                            num(rect.width * space.k),
                            num(rect.height * space.k),
                            num(space.x(rect.x)),
                            num(space.y(rect.y + rect.height)),
                            image.id
                        );
                    }
                }
            }
        }
        stream
    }

    /// Register fonts used across all pages. Each distinct (family, weight,
    /// italic) gets its own PDF font object.
    fn register_fonts(
        &self,
        builder: &mut PdfBuilder,
        pages: &[LayoutPage],
        fonts: &FontContext,
    ) -> Result<(), GridError> {
        let mut font_chars: BTreeMap<FontKey, BTreeSet<char>> = BTreeMap::new();
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            for command in &page.commands {
                if let DrawCommand::Text { lines, font, .. } = command {
                    let chars = font_chars.entry(font.clone()).or_default();
                    for line in lines {
                        chars.extend(substitute_placeholders(&line.text, i + 1, total).chars());
                    }
                }
            }
        }

        // Always have at least Helvetica
        if font_chars.is_empty() {
            font_chars.insert(FontKey::new("Helvetica", 400, false), BTreeSet::new());
        }

        for (key, chars) in &font_chars {
            match fonts.font_data(key) {
                FontData::Standard(std_font) => {
                    let font_dict = format!(
                        "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                         /Encoding /WinAnsiEncoding >>",
                        std_font.pdf_name()
                    );
                    let obj_id = builder.push(font_dict.into_bytes());
                    builder.font_objects.push((key.clone(), obj_id));
                }
                FontData::Custom { data, .. } => {
                    let obj_id = self.write_custom_font_objects(builder, key, data, chars)?;
                    builder.font_objects.push((key.clone(), obj_id));
                }
            }
        }
        Ok(())
    }

    /// Write each distinct image once, in store order.
    fn register_images(
        &self,
        builder: &mut PdfBuilder,
        pages: &[LayoutPage],
    ) -> Result<(), GridError> {
        let mut images: BTreeMap<usize, &SourceImage> = BTreeMap::new();
        for page in pages {
            for command in &page.commands {
                if let DrawCommand::Image { image, .. } = command {
                    images.entry(image.id).or_insert(image.as_ref());
                }
            }
        }
        for (id, image) in images {
            let obj_id = self.write_image_xobject(builder, image)?;
            builder.image_objects.insert(id, obj_id);
        }
        Ok(())
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(
        &self,
        builder: &mut PdfBuilder,
        image: &SourceImage,
    ) -> Result<usize, GridError> {
        let header = |color_space: &str| {
            format!(
                " /Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace {} /BitsPerComponent 8",
                image.width_px, image.height_px, color_space
            )
        };

        match image.decode()? {
            ImagePixelData::Jpeg { color_space } => {
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Length {}{} /Filter /DCTDecode >>\nstream\n",
                    image.bytes.len(),
                    header(color_space.pdf_name())
                );
                obj_data.extend_from_slice(&image.bytes);
                obj_data.extend_from_slice(b"\nendstream");
                Ok(builder.push(obj_data))
            }
            ImagePixelData::Decoded { rgb, alpha } => {
                let smask = alpha.map(|alpha| {
                    let data = self.stream_object(&header("/DeviceGray"), &alpha);
                    builder.push(data)
                });
                let extra = match smask {
                    Some(id) => format!("{} /SMask {} 0 R", header("/DeviceRGB"), id),
                    None => header("/DeviceRGB"),
                };
                let data = self.stream_object(&extra, &rgb);
                Ok(builder.push(data))
            }
        }
    }

    /// Build the /XObject resource dict entries for a page.
    fn build_xobject_resource_dict(page: &LayoutPage, builder: &PdfBuilder) -> String {
        let ids: BTreeSet<usize> = page
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { image, .. } => Some(image.id),
                _ => None,
            })
            .collect();
        ids.into_iter()
            .filter_map(|id| {
                builder
                    .image_objects
                    .get(&id)
                    .map(|obj_id| format!("/Im{id} {obj_id} 0 R"))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write the 5 CIDFont PDF objects for a custom TrueType font.
    /// Returns the object ID of the Type0 root font dictionary.
    fn write_custom_font_objects(
        &self,
        builder: &mut PdfBuilder,
        key: &FontKey,
        ttf_data: &[u8],
        used_chars: &BTreeSet<char>,
    ) -> Result<usize, GridError> {
        let face = ttf_parser::Face::parse(ttf_data, 0).map_err(|e| {
            GridError::SerializationFailed(format!(
                "failed to parse font '{}' for embedding: {e}",
                key.family
            ))
        })?;

        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();

        let char_to_gid: HashMap<char, u16> = used_chars
            .iter()
            .filter_map(|&ch| face.glyph_index(ch).map(|gid| (ch, gid.0)))
            .collect();

        let pdf_font_name = Self::sanitize_font_name(&key.family, key.weight, key.italic);

        // 1. FontFile2 stream
        let fontfile2_id = builder.push(
            self.stream_object(&format!(" /Length1 {}", ttf_data.len()), ttf_data),
        );

        // 2. FontDescriptor
        let scale = 1000.0 / units_per_em as f64;
        let bbox = face.global_bounding_box();
        let bbox_str = format!(
            "[{} {} {} {}]",
            (bbox.x_min as f64 * scale) as i32,
            (bbox.y_min as f64 * scale) as i32,
            (bbox.x_max as f64 * scale) as i32,
            (bbox.y_max as f64 * scale) as i32,
        );
        let cap_height = face.capital_height().unwrap_or(ascender) as f64 * scale;
        let stem_v = if key.weight >= 700 { 120 } else { 80 };
        let font_descriptor_id = builder.push(
            format!(
                "<< /Type /FontDescriptor /FontName /{} /Flags 4 \
                 /FontBBox {} /ItalicAngle {} \
                 /Ascent {} /Descent {} /CapHeight {} /StemV {} \
                 /FontFile2 {} 0 R >>",
                pdf_font_name,
                bbox_str,
                if key.italic { -12 } else { 0 },
                (ascender as f64 * scale) as i32,
                (descender as f64 * scale) as i32,
                cap_height as i32,
                stem_v,
                fontfile2_id,
            )
            .into_bytes(),
        );

        // 3. CIDFont dictionary (DescendantFont)
        let w_array = Self::build_w_array(&char_to_gid, &face, units_per_em);
        let default_width = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(|adv| (adv as f64 * scale) as u32)
            .unwrap_or(1000);
        let cidfont_id = builder.push(
            format!(
                "<< /Type /Font /Subtype /CIDFontType2 /BaseFont /{} \
                 /CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> \
                 /FontDescriptor {} 0 R /DW {} /W {} \
                 /CIDToGIDMap /Identity >>",
                pdf_font_name, font_descriptor_id, default_width, w_array,
            )
            .into_bytes(),
        );

        // 4. ToUnicode CMap
        let cmap = Self::build_tounicode_cmap(&char_to_gid, &pdf_font_name);
        let tounicode_id = builder.push(self.stream_object("", cmap.as_bytes()));

        // 5. Type0 font dictionary (the root, referenced by /Resources)
        let type0_id = builder.push(
            format!(
                "<< /Type /Font /Subtype /Type0 /BaseFont /{} \
                 /Encoding /Identity-H \
                 /DescendantFonts [{} 0 R] \
                 /ToUnicode {} 0 R >>",
                pdf_font_name, cidfont_id, tounicode_id,
            )
            .into_bytes(),
        );

        builder.custom_gids.insert(key.clone(), char_to_gid);
        Ok(type0_id)
    }

    /// Build the /W array for per-glyph widths in CIDFont.
    /// Format: [gid [width] gid [width] ...]
    fn build_w_array(
        char_to_gid: &HashMap<char, u16>,
        face: &ttf_parser::Face,
        units_per_em: u16,
    ) -> String {
        let scale = 1000.0 / units_per_em as f64;
        let gids: BTreeSet<u16> = char_to_gid.values().copied().collect();
        let mut result = String::from("[");
        for gid in gids {
            let advance = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
            let _ = write!(result, " {} [{}]", gid, (advance as f64 * scale) as u32);
        }
        result.push_str(" ]");
        result
    }

    /// Build a ToUnicode CMap for text extraction/copy-paste support.
    fn build_tounicode_cmap(char_to_gid: &HashMap<char, u16>, font_name: &str) -> String {
        let mut gid_to_unicode: Vec<(u16, char)> =
            char_to_gid.iter().map(|(&ch, &gid)| (gid, ch)).collect();
        gid_to_unicode.sort();

        let mut cmap = String::new();
        cmap.push_str("/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n");
        cmap.push_str("/CIDSystemInfo\n<< /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        let _ = writeln!(cmap, "/CMapName /{font_name}-UTF16 def");
        cmap.push_str("/CMapType 2 def\n1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

        // beginbfchar blocks hold at most 100 entries
        for chunk in gid_to_unicode.chunks(100) {
            let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
            for &(gid, ch) in chunk {
                let mut units = [0u16; 2];
                let utf16: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04X}"))
                    .collect();
                let _ = writeln!(cmap, "<{gid:04X}> <{utf16}>");
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
        cmap
    }

    /// Sanitize a font name for use as a PDF name object.
    /// Strips spaces and special characters, appends weight/style suffixes.
    fn sanitize_font_name(family: &str, weight: u32, italic: bool) -> String {
        let mut name: String = family
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if name.is_empty() {
            name = "CustomFont".to_string();
        }
        if weight >= 700 {
            name.push_str("-Bold");
        }
        if italic {
            name.push_str("-Italic");
        }
        name
    }

    fn build_font_resource_dict(font_objects: &[(FontKey, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{i} {obj_id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resource index (/F0, /F1, ...) of `key`; the first font when missing.
    fn font_index(key: &FontKey, font_objects: &[(FontKey, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(k, _)| k == key)
            .unwrap_or(0)
    }

    fn build_info_dict(metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
            ("Creator", &metadata.creator),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                let _ = write!(info, "/{} {} ", name, text_string(value));
            }
        }
        let _ = write!(info, "/Producer (gridpage {}) >>", env!("CARGO_PKG_VERSION"));
        info
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{i} 0 obj\n");
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{offset:010} 00000 n \n");
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );
        output
    }
}

fn substitute_placeholders(text: &str, page_number: usize, total_pages: usize) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }
    text.replace(PAGE_NUMBER, &page_number.to_string())
        .replace(TOTAL_PAGES, &total_pages.to_string())
}

/// Fixed-precision number with trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn rgb(color: Color) -> String {
    let (r, g, b) = color.unit();
    format!("{} {} {}", num(r), num(g), num(b))
}

/// Body of a literal string in WinAnsiEncoding. Characters outside the
/// encoding become `?`.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match unicode_to_winansi(ch).unwrap_or(b'?') {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            b @ 0x20..=0x7E => out.push(b as char),
            b => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out
}

/// Hex string of glyph ids for an Identity-H font. Unmapped characters use
/// glyph 0.
fn encode_glyphs(text: &str, char_to_gid: &HashMap<char, u16>) -> String {
    let hex: String = text
        .chars()
        .map(|ch| format!("{:04X}", char_to_gid.get(&ch).copied().unwrap_or(0)))
        .collect();
    format!("<{hex}>")
}

/// A PDF text string: literal when ASCII, UTF-16BE hex with BOM otherwise.
fn text_string(s: &str) -> String {
    if s.is_ascii() {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        format!("({escaped})")
    } else {
        let hex: String = s.encode_utf16().map(|u| format!("{u:04X}")).collect();
        format!("<FEFF{hex}>")
    }
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Codepoints in 0x20..=0x7E and
/// 0xA0..=0xFF map directly; 0x80..=0x9F holds smart quotes, bullets, dashes
/// and a few letters.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}
