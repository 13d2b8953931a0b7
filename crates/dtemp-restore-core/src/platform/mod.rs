#[cfg(target_os = "windows")]
pub mod windows;

use std::path::Path;

/// Clears a platform "hidden" marker on a restored file.
///
/// Returns `false` when the attribute could not be read or written; callers treat
/// that as a warning only.
pub trait VisibilityNormalizer {
    fn clear_hidden(&self, path: &Path) -> bool;
}

/// For platforms without a hidden attribute.
pub struct NoopVisibility;

impl VisibilityNormalizer for NoopVisibility {
    fn clear_hidden(&self, _path: &Path) -> bool {
        true
    }
}

#[cfg(target_os = "windows")]
pub fn default_visibility() -> Box<dyn VisibilityNormalizer> {
    Box::new(windows::WindowsVisibility)
}

#[cfg(not(target_os = "windows"))]
pub fn default_visibility() -> Box<dyn VisibilityNormalizer> {
    Box::new(NoopVisibility)
}
