//! # Image Loading and Decoding
//!
//! Images are handled in two steps. During preparation the source is read
//! fully into memory and only the header is probed for format and pixel
//! dimensions; a failure there is an [`GridError::UnreadableImage`]. Pixels
//! are decoded later, when the PDF writer embeds the image: JPEG passes
//! through untouched (DCTDecode), PNG and WebP are decoded to RGB with a
//! separate alpha channel for SMask transparency.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use crate::error::{ElementPath, GridError};
use crate::model::ImageSource;

/// An image whose bytes are in memory and whose header has been read.
#[derive(Debug)]
pub struct SourceImage {
    /// Position in the document's image store; one XObject per id.
    pub id: usize,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width_px: u32,
    pub height_px: u32,
    /// The first element that referenced this image.
    pub first_use: ElementPath,
}

impl SourceImage {
    /// Intrinsic height over width.
    pub fn aspect(&self) -> f64 {
        self.height_px as f64 / self.width_px as f64
    }

    /// Decode the pixel data for embedding.
    pub fn decode(&self) -> Result<ImagePixelData, GridError> {
        match self.format {
            ImageFormat::Jpeg => {
                let color_space = detect_jpeg_color_space(&self.bytes)
                    .map_err(|e| self.serialization_error(e))?;
                Ok(ImagePixelData::Jpeg { color_space })
            }
            _ => decode_to_rgb(&self.bytes).map_err(|e| self.serialization_error(e)),
        }
    }

    fn serialization_error(&self, reason: String) -> GridError {
        GridError::SerializationFailed(format!(
            "image {} (first used at {}): {reason}",
            self.id, self.first_use
        ))
    }
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone)]
pub enum ImagePixelData {
    /// The source bytes are a baseline JPEG; embed them as-is.
    Jpeg { color_space: JpegColorSpace },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl JpegColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            JpegColorSpace::DeviceRGB => "/DeviceRGB",
            JpegColorSpace::DeviceGray => "/DeviceGray",
        }
    }
}

/// Loads each distinct image source once per document.
#[derive(Debug, Default)]
pub struct ImageStore {
    by_source: HashMap<ImageSource, Arc<SourceImage>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and probe `source`, or return the copy loaded earlier.
    /// `path` is the element asking for it.
    pub fn load(
        &mut self,
        source: &ImageSource,
        path: ElementPath,
    ) -> Result<Arc<SourceImage>, GridError> {
        if let Some(image) = self.by_source.get(source) {
            return Ok(Arc::clone(image));
        }
        let bytes = resolve_source(source).map_err(|e| GridError::image(e).at(path))?;
        let image = probe(self.by_source.len(), bytes, path)
            .map_err(|e| GridError::image(e).at(path))?;
        let image = Arc::new(image);
        log::debug!(
            "loaded image {} ({:?}, {}x{} px)",
            image.id,
            image.format,
            image.width_px,
            image.height_px
        );
        self.by_source.insert(source.clone(), Arc::clone(&image));
        Ok(image)
    }

    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

fn resolve_source(source: &ImageSource) -> Result<Vec<u8>, String> {
    match source {
        ImageSource::Path(path) => std::fs::read(path)
            .map_err(|e| format!("failed to read image file '{path}': {e}")),
        ImageSource::Base64(data) => read_source_bytes(data),
        ImageSource::Bytes(bytes) => Ok(bytes.clone()),
    }
}

/// Resolve a source string to raw bytes.
///
/// Supported formats:
/// - `data:<mime>;base64,...` data URI
/// - path of an existing file, or one starting with `/`, `./` or `../`
/// - raw base64-encoded data
pub fn read_source_bytes(src: &str) -> Result<Vec<u8>, String> {
    if src.starts_with("data:") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| "invalid data URI: missing comma".to_string())?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Base64 text may contain '/', so only explicit prefixes or files that
    // actually exist are treated as paths.
    let explicit = src.starts_with('/') || src.starts_with("./") || src.starts_with("../");
    if explicit || Path::new(src).is_file() {
        return std::fs::read(src).map_err(|e| format!("failed to read file '{src}': {e}"));
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| format!("base64 decode error: {e}"))
}

/// Read format and dimensions from the header without decoding pixels.
fn probe(id: usize, bytes: Vec<u8>, first_use: ElementPath) -> Result<SourceImage, String> {
    if bytes.len() < 4 {
        return Err("image data too short".to_string());
    }
    let reader = image::io::Reader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| format!("format detection error: {e}"))?;
    let format = match reader.format() {
        Some(f @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => f,
        Some(other) => return Err(format!("unsupported image format {other:?}")),
        None => return Err("unrecognized image format (expected JPEG, PNG or WebP)".to_string()),
    };
    if format == ImageFormat::Jpeg {
        detect_jpeg_color_space(&bytes)?;
    }
    let (width_px, height_px) = reader
        .into_dimensions()
        .map_err(|e| format!("failed to read image header: {e}"))?;
    if width_px == 0 || height_px == 0 {
        return Err(format!("image has zero size ({width_px}x{height_px})"));
    }
    Ok(SourceImage {
        id,
        bytes,
        format,
        width_px,
        height_px,
        first_use,
    })
}

/// Scan JPEG markers for the SOF segment and read the component count.
/// Four-component (CMYK/YCCK) JPEGs cannot be embedded as DeviceRGB.
fn detect_jpeg_color_space(data: &[u8]) -> Result<JpegColorSpace, String> {
    let mut i = 2; // skip SOI
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            // length(2) precision(1) height(2) width(2) components(1)
            return match data[i + 9] {
                1 => Ok(JpegColorSpace::DeviceGray),
                3 => Ok(JpegColorSpace::DeviceRGB),
                n => Err(format!("unsupported JPEG with {n} color components")),
            };
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err("JPEG has no frame header".to_string())
}

/// Decode to RGBA, split into RGB + alpha.
fn decode_to_rgb(data: &[u8]) -> Result<ImagePixelData, String> {
    let img = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("format detection error: {e}"))?
        .decode()
        .map_err(|e| format!("failed to decode image: {e}"))?;

    let rgba = img.to_rgba8();
    let pixel_count = (rgba.width() * rgba.height()) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
        has_transparency |= pixel[3] != 255;
    }

    Ok(ImagePixelData::Decoded {
        rgb,
        alpha: has_transparency.then_some(alpha),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn path() -> ElementPath {
        ElementPath::row(crate::error::Region::Body, 0).column(0).element(0)
    }

    pub(crate) fn png_bytes(w: u32, h: u32, alpha: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, alpha]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), w, h, image::ColorType::Rgba8)
            .unwrap();
        buf
    }

    #[test]
    fn probe_reads_dimensions() {
        let mut store = ImageStore::new();
        let img = store.load(&ImageSource::Bytes(png_bytes(4, 2, 255)), path()).unwrap();
        assert_eq!((img.width_px, img.height_px), (4, 2));
        assert_eq!(img.format, ImageFormat::Png);
        assert!((img.aspect() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn same_source_loads_once() {
        let mut store = ImageStore::new();
        let src = ImageSource::Bytes(png_bytes(1, 1, 255));
        let a = store.load(&src, path()).unwrap();
        let b = store.load(&src, path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn garbage_is_unreadable() {
        let mut store = ImageStore::new();
        let err = store
            .load(&ImageSource::Bytes(vec![0, 1, 2, 3, 4, 5]), path())
            .unwrap_err();
        assert!(matches!(err, GridError::UnreadableImage { .. }));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let mut store = ImageStore::new();
        let err = store
            .load(&ImageSource::Path("/nonexistent/logo.png".into()), path())
            .unwrap_err();
        assert!(matches!(err, GridError::UnreadableImage { .. }));
    }

    #[test]
    fn invalid_data_uri() {
        assert!(read_source_bytes("data:image/png;base64").is_err());
    }

    #[test]
    fn base64_data_uri() {
        use base64::Engine;
        let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes(3, 3, 255));
        let mut store = ImageStore::new();
        let img = store
            .load(&ImageSource::Base64(format!("data:image/png;base64,{b64}")), path())
            .unwrap();
        assert_eq!(img.width_px, 3);
    }

    #[test]
    fn decode_opaque_png_has_no_alpha() {
        let img = probe(0, png_bytes(1, 1, 255), path()).unwrap();
        match img.decode().unwrap() {
            ImagePixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, vec![255, 0, 0]);
                assert!(alpha.is_none());
            }
            other => panic!("expected decoded pixels, got {other:?}"),
        }
    }

    #[test]
    fn decode_png_with_alpha() {
        let img = probe(0, png_bytes(1, 1, 128), path()).unwrap();
        match img.decode().unwrap() {
            ImagePixelData::Decoded { alpha, .. } => assert_eq!(alpha.unwrap(), vec![128]),
            other => panic!("expected decoded pixels, got {other:?}"),
        }
    }

    #[test]
    fn jpeg_passes_through() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();

        let probed = probe(0, buf, path()).unwrap();
        assert_eq!(probed.format, ImageFormat::Jpeg);
        match probed.decode().unwrap() {
            ImagePixelData::Jpeg { color_space } => {
                assert_eq!(color_space, JpegColorSpace::DeviceRGB)
            }
            other => panic!("expected JPEG passthrough, got {other:?}"),
        }
    }

    /// SOI, then a SOF0 segment declaring 4 components.
    const CMYK_JPEG: [u8; 12] = [
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x01, 0x00, 0x01, 0x04,
    ];

    #[test]
    fn cmyk_jpeg_is_unreadable_at_load() {
        assert!(detect_jpeg_color_space(&CMYK_JPEG).is_err());

        let at = ElementPath::row(crate::error::Region::Body, 1).column(0).element(0);
        let mut store = ImageStore::new();
        let err = store
            .load(&ImageSource::Bytes(CMYK_JPEG.to_vec()), at)
            .unwrap_err();
        assert!(matches!(err, GridError::UnreadableImage { .. }));
        assert_eq!(err.path(), Some(&at));
        assert!(err.to_string().contains("4 color components"));
    }

    #[test]
    fn decode_failure_names_first_use() {
        let at = ElementPath::row(crate::error::Region::Header, 2).column(1).element(0);
        let mut image = probe(0, png_bytes(2, 2, 255), at).unwrap();
        image.bytes.truncate(40);
        let err = image.decode().unwrap_err();
        assert!(matches!(err, GridError::SerializationFailed(_)));
        assert!(err.to_string().contains("header row 2 / column 1 / element 0"));
    }
}
