//! ExifTool discovery
//!
//! Resolves the on-disk location of the ExifTool executable. Discovery is a
//! fixed-order lookup: an explicit configured path wins, then a directory
//! relative to the running executable's install location, then the per-user
//! local application data directory. The versioned, bitness-tagged directory
//! name matches the layout the tool distribution unpacks to.

use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::core::config::ToolConfig;
use crate::core::error::{ExtractError, Result};

/// ExifTool release this build expects on disk
pub const TOOL_VERSION: &str = "13.29";

/// Bitness tag matching the tool's own binary layout
pub const TOOL_BITS: &str = if cfg!(target_pointer_width = "64") {
    "64"
} else {
    "32"
};

/// Namespace directory the tool distribution is unpacked under
pub const TOOL_NAMESPACE: &str = "indd_preview_tool";

/// Executable name inside the versioned directory
///
/// The Windows distribution ships the "pause on exit" variant, hence the
/// `(-k)` suffix; the priming byte written by the runner dismisses it.
#[cfg(windows)]
pub const TOOL_EXE: &str = "exiftool(-k).exe";
#[cfg(not(windows))]
pub const TOOL_EXE: &str = "exiftool";

/// Which discovery stage produced the resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    /// Explicit path from the configuration file
    Configured,
    /// Path relative to the application install directory
    InstallDir,
    /// Path under the per-user local data directory
    UserData,
}

impl DiscoveryStage {
    /// Get a human-readable name for this stage
    pub fn display_name(&self) -> &'static str {
        match self {
            DiscoveryStage::Configured => "configured path",
            DiscoveryStage::InstallDir => "install directory",
            DiscoveryStage::UserData => "user data directory",
        }
    }
}

/// A successfully resolved tool location
#[derive(Debug, Clone)]
pub struct ResolvedTool {
    /// Full path to the executable
    pub path: PathBuf,
    /// Discovery stage that found it
    pub stage: DiscoveryStage,
}

/// Resolves the ExifTool executable through the staged lookup
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    override_path: Option<PathBuf>,
    install_root: Option<PathBuf>,
    data_root: Option<PathBuf>,
}

impl ToolLocator {
    /// Create a locator from the tool configuration section
    ///
    /// The install root defaults to the directory containing the running
    /// executable; the data root to the platform local-data directory.
    pub fn from_config(config: &ToolConfig) -> Self {
        let install_root = config.install_dir.clone().or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        });

        Self {
            override_path: config.path.clone(),
            install_root,
            data_root: dirs::data_local_dir(),
        }
    }

    /// Create a locator with explicit roots (used by tests)
    pub fn with_roots(install_root: Option<PathBuf>, data_root: Option<PathBuf>) -> Self {
        Self {
            override_path: None,
            install_root,
            data_root,
        }
    }

    /// Set an explicit executable path that bypasses the staged lookup
    pub fn with_override(mut self, path: PathBuf) -> Self {
        self.override_path = Some(path);
        self
    }

    /// Relative path of the executable below a discovery root
    fn versioned_subpath() -> PathBuf {
        PathBuf::from(TOOL_NAMESPACE)
            .join(format!("exiftool-{}_{}", TOOL_VERSION, TOOL_BITS))
            .join(TOOL_EXE)
    }

    /// All candidate locations in discovery order
    pub fn candidates(&self) -> Vec<(DiscoveryStage, PathBuf)> {
        let mut candidates = Vec::new();

        if let Some(ref path) = self.override_path {
            candidates.push((DiscoveryStage::Configured, path.clone()));
        }
        if let Some(ref root) = self.install_root {
            candidates.push((DiscoveryStage::InstallDir, root.join(Self::versioned_subpath())));
        }
        if let Some(ref root) = self.data_root {
            candidates.push((DiscoveryStage::UserData, root.join(Self::versioned_subpath())));
        }

        candidates
    }

    /// Resolve the executable, or fail with the list of searched locations
    pub fn resolve(&self) -> Result<ResolvedTool> {
        let candidates = self.candidates();

        for (stage, path) in &candidates {
            trace!("checking {} candidate: {}", stage.display_name(), path.display());
            if path.is_file() {
                debug!("resolved ExifTool via {}: {}", stage.display_name(), path.display());
                return Ok(ResolvedTool {
                    path: path.clone(),
                    stage: *stage,
                });
            }
        }

        Err(ExtractError::ToolNotFound {
            searched: candidates.into_iter().map(|(_, p)| p).collect(),
        })
    }
}
