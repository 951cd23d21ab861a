//! Preview decoding and display metadata
//!
//! Turns the raw byte buffer captured from the external tool into a decoded
//! image plus the metadata the display layer needs: native pixel dimensions
//! and the resolution-scale factors used to compute the display title.

use std::fmt;

use image::DynamicImage;

use crate::core::error::Result;

/// InDesign's default internal unit is points, where 1 inch = 72 points.
/// Exported previews and thumbnails are therefore typically rendered at
/// 72 DPI rather than the display resolution.
pub const SOURCE_DPI: f64 = 72.0;

/// Reference display resolution the title dimensions are normalized to
pub const DISPLAY_DPI: f64 = 96.0;

/// A decoded preview image with its display metadata
///
/// Read-only after creation. The scale factors default to
/// `SOURCE_DPI / DISPLAY_DPI` and adjust the native pixel dimensions when
/// rendering the display title.
#[derive(Clone)]
pub struct DecodedPreview {
    image: DynamicImage,
    width: u32,
    height: u32,
    scale_x: f64,
    scale_y: f64,
}

impl DecodedPreview {
    /// Wrap a decoded image using the default 72/96 DPI assumption
    pub fn new(image: DynamicImage) -> Self {
        let scale = SOURCE_DPI / DISPLAY_DPI;
        Self::with_scale(image, scale, scale)
    }

    /// Wrap a decoded image with explicit resolution-scale factors
    ///
    /// For callers that know the true source resolution of the rendered
    /// preview (scale 1.0 means the image was produced at display
    /// resolution).
    pub fn with_scale(image: DynamicImage, scale_x: f64, scale_y: f64) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            image,
            width,
            height,
            scale_x,
            scale_y,
        }
    }

    /// The decoded image bitmap
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Native pixel width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Native pixel height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal resolution-scale factor
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Vertical resolution-scale factor
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Width adjusted by the resolution-scale factor, truncated
    pub fn display_width(&self) -> u32 {
        (f64::from(self.width) * self.scale_x) as u32
    }

    /// Height adjusted by the resolution-scale factor, truncated
    pub fn display_height(&self) -> u32 {
        (f64::from(self.height) * self.scale_y) as u32
    }

    /// Render the display title for a file name
    pub fn display_title(&self, file_name: &str) -> String {
        format!(
            "{}×{}: {}",
            self.display_width(),
            self.display_height(),
            file_name
        )
    }
}

impl fmt::Debug for DecodedPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedPreview")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale_x", &self.scale_x)
            .field("scale_y", &self.scale_y)
            .finish_non_exhaustive()
    }
}

/// Decode a non-empty raw tool response as an image
///
/// The payload is an opaque image blob with no surrounding framing; the
/// format is sniffed from the bytes themselves. Malformed input fails with
/// `DecodeFailed`, which is a distinct condition from an empty response
/// (the caller never passes one here).
pub fn decode_preview(bytes: &[u8]) -> Result<DecodedPreview> {
    let image = image::load_from_memory(bytes)?;
    Ok(DecodedPreview::new(image))
}
