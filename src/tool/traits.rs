//! Tool abstraction traits for testability
//!
//! This module defines the seam between the extraction pipeline and the
//! concrete external tool, allowing both the real ExifTool subprocess and
//! mock tools to be used interchangeably. This enables comprehensive testing
//! of the pipeline without an ExifTool installation.
//!
//! # Architecture
//!
//! - `PreviewTool` - Runs one extraction and returns the raw output bytes
//! - `ExtractionMode` - Enum identifying which kind of preview is requested
//!
//! The mode also owns the command-line argument template for each kind of
//! invocation, so every backend (real or mock) renders identical argument
//! vectors.

use std::ffi::OsString;
use std::fmt::{self, Display};
use std::path::Path;

use crate::core::error::Result;

/// Identifies which kind of preview the external tool should produce
///
/// InDesign documents carry a rendered page image per story item; templates
/// carry only the small embedded thumbnail raster. The mapping from file
/// extension to mode is total: anything unrecognized falls back to the
/// thumbnail request, which is the cheaper of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractionMode {
    /// Small embedded preview raster stored inside the document
    #[default]
    ThumbnailImage,
    /// Rendered raster of the first page item, generated on demand
    PageImage,
}

/// Extensions that request a rendered page image
const PAGE_IMAGE_EXTENSIONS: &[&str] = &[
    "indd", // Adobe InDesign Document file
];

/// Extensions that request the embedded thumbnail
const THUMBNAIL_EXTENSIONS: &[&str] = &[
    "indt", // Adobe InDesign Template file
];

impl ExtractionMode {
    /// Select the extraction mode for a file path
    ///
    /// The mapping is by lowercase extension and is total: unrecognized
    /// extensions (and paths without one) select `ThumbnailImage`.
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if PAGE_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            ExtractionMode::PageImage
        } else {
            ExtractionMode::ThumbnailImage
        }
    }

    /// Render the ExifTool argument vector for this mode
    ///
    /// The target file is always the first argument. `-b` selects binary
    /// output, `-m` suppresses minor-warning tags; page image extraction
    /// additionally addresses the first document item.
    pub fn args(&self, path: &Path) -> Vec<OsString> {
        let mut args = vec![path.as_os_str().to_os_string()];
        let flags: &[&str] = match self {
            ExtractionMode::PageImage => &["-listItem", "0", "-pageimage", "-b", "-m"],
            ExtractionMode::ThumbnailImage => &["-thumbnailimage", "-b", "-m"],
        };
        args.extend(flags.iter().copied().map(OsString::from));
        args
    }

    /// Check if this mode requests a rendered page image
    pub fn is_page_image(&self) -> bool {
        matches!(self, ExtractionMode::PageImage)
    }

    /// Get a human-readable name for this mode
    pub fn display_name(&self) -> &'static str {
        match self {
            ExtractionMode::ThumbnailImage => "thumbnail image",
            ExtractionMode::PageImage => "page image",
        }
    }
}

impl Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Check whether a path is one of the document types this tool handles
///
/// This is the capability gate the host queries before anything else runs;
/// paths that fail it never reach the pipeline.
pub fn is_supported(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    PAGE_IMAGE_EXTENSIONS.contains(&ext.as_str()) || THUMBNAIL_EXTENSIONS.contains(&ext.as_str())
}

/// Trait for preview extraction backends
///
/// One call spawns (or simulates) one tool invocation and returns the
/// entire standard-output content as an owned byte buffer. A zero-length
/// buffer is a valid result meaning "no preview available" and must not be
/// reported as an error by implementations.
pub trait PreviewTool: Send + Sync {
    /// Run one extraction and return the raw output bytes
    fn extract(&self, path: &Path, mode: ExtractionMode) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mode_for_known_extensions() {
        assert_eq!(
            ExtractionMode::for_path(Path::new("report.indd")),
            ExtractionMode::PageImage
        );
        assert_eq!(
            ExtractionMode::for_path(Path::new("template.indt")),
            ExtractionMode::ThumbnailImage
        );
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        assert_eq!(
            ExtractionMode::for_path(Path::new("REPORT.INDD")),
            ExtractionMode::PageImage
        );
        assert_eq!(
            ExtractionMode::for_path(Path::new("Layout.InDd")),
            ExtractionMode::PageImage
        );
    }

    #[test]
    fn test_mode_falls_back_to_thumbnail() {
        // The mapping must be total: anything unrecognized selects the
        // thumbnail request, deterministically.
        for name in ["notes.txt", "archive.zip", "noextension", ".hidden", "a.indd.bak"] {
            assert_eq!(
                ExtractionMode::for_path(Path::new(name)),
                ExtractionMode::ThumbnailImage,
                "fallback failed for {}",
                name
            );
        }
    }

    #[test]
    fn test_mode_default_is_thumbnail() {
        assert_eq!(ExtractionMode::default(), ExtractionMode::ThumbnailImage);
    }

    #[test]
    fn test_page_image_args() {
        let args = ExtractionMode::PageImage.args(Path::new("report.indd"));
        assert_eq!(args[0], OsString::from("report.indd"));
        let flags: Vec<String> = args[1..]
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(flags, ["-listItem", "0", "-pageimage", "-b", "-m"]);
    }

    #[test]
    fn test_thumbnail_args() {
        let args = ExtractionMode::ThumbnailImage.args(Path::new("template.indt"));
        assert_eq!(args[0], OsString::from("template.indt"));
        let flags: Vec<String> = args[1..]
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(flags, ["-thumbnailimage", "-b", "-m"]);
    }

    #[test]
    fn test_path_is_first_argument() {
        let path = PathBuf::from("/data/with space/report.indd");
        let args = ExtractionMode::for_path(&path).args(&path);
        // No shell is involved, so the path is passed verbatim as one argument.
        assert_eq!(args[0].as_os_str(), path.as_os_str());
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a.indd")));
        assert!(is_supported(Path::new("a.INDT")));
        assert!(!is_supported(Path::new("a.pdf")));
        assert!(!is_supported(Path::new("indd")));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ExtractionMode::ThumbnailImage.to_string(), "thumbnail image");
        assert_eq!(ExtractionMode::PageImage.to_string(), "page image");
    }
}
