//! Image dimensions read from file headers

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lsp::features::traits::{ImageDimensions, ImageMetadataProvider, ServiceError};
use crate::pattern::compile;

/// Bytes of an SVG read when looking for the root element
const SVG_HEAD_BYTES: u64 = 8 * 1024;

static SVG_ROOT: Lazy<Regex> = Lazy::new(|| compile(r"(?s)<svg\b[^>]*>"));

static SVG_WIDTH: Lazy<Regex> = Lazy::new(|| compile(r#"\swidth\s*=\s*["']\s*([0-9.]+)(?:px)?\s*["']"#));

static SVG_HEIGHT: Lazy<Regex> = Lazy::new(|| compile(r#"\sheight\s*=\s*["']\s*([0-9.]+)(?:px)?\s*["']"#));

static SVG_VIEW_BOX: Lazy<Regex> = Lazy::new(|| {
    compile(r#"\sviewBox\s*=\s*["']\s*[-0-9.]+[\s,]+[-0-9.]+[\s,]+([0-9.]+)[\s,]+([0-9.]+)\s*["']"#)
});

/// Probes raster formats with `imagesize` and SVGs from their root element
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderImageProbe;

impl HeaderImageProbe {
    pub fn new() -> Self {
        Self
    }

    fn probe_svg(path: &Path) -> Result<ImageDimensions, ServiceError> {
        let mut bytes = Vec::new();
        File::open(path)
            .and_then(|file| file.take(SVG_HEAD_BYTES).read_to_end(&mut bytes))
            .map_err(|e| probe_error(path, e))?;
        // The cut may split a multibyte character
        let head = String::from_utf8_lossy(&bytes);

        let root = SVG_ROOT
            .find(&head)
            .ok_or_else(|| probe_error(path, "no <svg> element"))?
            .as_str();

        let attribute = |re: &Regex| re.captures(root).and_then(|c| c[1].parse::<f64>().ok());
        let (width, height) = match (attribute(&*SVG_WIDTH), attribute(&*SVG_HEIGHT)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                let caps = SVG_VIEW_BOX
                    .captures(root)
                    .ok_or_else(|| probe_error(path, "svg has no size or viewBox"))?;
                let w = caps[1].parse::<f64>().map_err(|e| probe_error(path, e))?;
                let h = caps[2].parse::<f64>().map_err(|e| probe_error(path, e))?;
                (w, h)
            }
        };

        Ok(ImageDimensions {
            width: width.round() as u32,
            height: height.round() as u32,
        })
    }
}

impl ImageMetadataProvider for HeaderImageProbe {
    fn probe(&self, path: &Path) -> Result<ImageDimensions, ServiceError> {
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            return Self::probe_svg(path);
        }

        let size = imagesize::size(path).map_err(|e| probe_error(path, e))?;
        Ok(ImageDimensions {
            width: u32::try_from(size.width).map_err(|e| probe_error(path, e))?,
            height: u32::try_from(size.height).map_err(|e| probe_error(path, e))?,
        })
    }
}

fn probe_error(path: &Path, message: impl std::fmt::Display) -> ServiceError {
    ServiceError::ImageProbe {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        fs::write(&path, png_header(640, 480)).unwrap();

        let dims = HeaderImageProbe::new().probe(&path).unwrap();
        assert_eq!(dims, ImageDimensions { width: 640, height: 480 });
    }

    #[test]
    fn test_gif_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.gif");
        let mut bytes = b"GIF89a".to_vec();
        bytes.extend_from_slice(&32u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(&[0; 16]);
        fs::write(&path, bytes).unwrap();

        let dims = HeaderImageProbe::new().probe(&path).unwrap();
        assert_eq!(dims, ImageDimensions { width: 32, height: 16 });
    }

    #[test]
    fn test_svg_attributes_and_view_box() {
        let dir = tempfile::tempdir().unwrap();
        let sized = dir.path().join("sized.svg");
        fs::write(&sized, r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="120px" height="60"></svg>"#)
            .unwrap();
        let boxed = dir.path().join("boxed.svg");
        fs::write(&boxed, r#"<svg viewBox="0 0 300 150" xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();

        let probe = HeaderImageProbe::new();
        assert_eq!(probe.probe(&sized).unwrap(), ImageDimensions { width: 120, height: 60 });
        assert_eq!(probe.probe(&boxed).unwrap(), ImageDimensions { width: 300, height: 150 });
    }

    #[test]
    fn test_svg_with_multibyte_char_at_read_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accent.svg");
        let mut contents = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32"><!-- "#);
        let boundary = SVG_HEAD_BYTES as usize - 1;
        contents.push_str(&"x".repeat(boundary - contents.len()));
        // 'é' occupies the last byte read and the first byte left unread
        contents.push_str("é -->\n</svg>");
        assert_eq!(contents.find('é'), Some(boundary));
        fs::write(&path, contents).unwrap();

        let dims = HeaderImageProbe::new().probe(&path).unwrap();
        assert_eq!(dims, ImageDimensions { width: 64, height: 32 });
    }

    #[test]
    fn test_unreadable_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").unwrap();

        let result = HeaderImageProbe::new().probe(&path);
        assert!(matches!(result, Err(ServiceError::ImageProbe { .. })));

        let missing = HeaderImageProbe::new().probe(&dir.path().join("missing.svg"));
        assert!(matches!(missing, Err(ServiceError::ImageProbe { .. })));
    }
}
