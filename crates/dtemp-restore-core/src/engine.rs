use crate::config::RestoreConfig;
use crate::error::{Error, SkipReason};
use crate::platform::{self, VisibilityNormalizer};
use crate::progress::ProgressReporter;
use crate::restore::{self, sanitize::normalize};
use crate::scanner::{self, StagedItem};
use crate::sidecar::{self, SidecarRecord};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct RestoreEngine {
    config: RestoreConfig,
    visibility: Box<dyn VisibilityNormalizer>,
}

/// One staged file that was left in place, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub identifier: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.identifier, self.reason)
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: usize,
    pub candidates: usize,
    pub sidecars: usize,
    pub processed: usize,
    pub restored: usize,
    pub restored_paths: Vec<PathBuf>,
    pub skipped: Vec<SkipRecord>,
    /// Post-move problems (timestamp, hidden attribute, sidecar cleanup).
    pub warnings: usize,
    /// Where the skip log was written, `None` if writing it failed.
    pub skip_log: Option<PathBuf>,
    pub duration: Duration,
}

impl RunReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl RestoreEngine {
    pub fn new(config: RestoreConfig) -> Self {
        Self {
            config,
            visibility: platform::default_visibility(),
        }
    }

    pub fn with_visibility(mut self, visibility: Box<dyn VisibilityNormalizer>) -> Self {
        self.visibility = visibility;
        self
    }

    /// Run one restoration pass over `root`:
    /// 1. List the staging root and pair candidates with sidecars
    /// 2. Move each matched candidate to its archived location
    /// 3. Write the skip log
    ///
    /// Only startup failures (missing root, unreadable listing) are errors; every
    /// per-item failure becomes a `SkipRecord`.
    pub fn run(&self, root: &Path, reporter: &dyn ProgressReporter) -> Result<RunReport, Error> {
        if !root.exists() {
            return Err(Error::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::RootNotADirectory(root.to_path_buf()));
        }
        let root = normalize(&std::path::absolute(root)?);
        let start = Instant::now();

        let ignore_patterns = scanner::compile_ignore_patterns(&self.config.ignore_patterns);
        let listing =
            scanner::list_staging(&root, &self.config.sidecar_extension, &ignore_patterns)?;
        let index = scanner::build_sidecar_index(&listing.sidecars);

        debug!(
            "Files in folder: {}, files without extension: {}, .{} files: {}",
            listing.entries,
            listing.candidates.len(),
            self.config.sidecar_extension,
            listing.sidecars.len(),
        );
        reporter.on_listing_complete(
            listing.entries,
            listing.candidates.len(),
            listing.sidecars.len(),
        );

        let mut report = RunReport {
            entries: listing.entries,
            candidates: listing.candidates.len(),
            sidecars: listing.sidecars.len(),
            ..Default::default()
        };

        reporter.on_restore_start(listing.candidates.len());
        for item in &listing.candidates {
            report.processed += 1;
            let sidecar = index.get(&item.name).map(PathBuf::as_path);

            match self.restore_item(&root, item, sidecar, &mut report.warnings) {
                Ok(destination) => {
                    info!("Restored: {}", destination.display());
                    reporter.on_item_restored(&item.name, &destination);
                    report.restored += 1;
                    report.restored_paths.push(destination);
                }
                Err(reason) => {
                    debug!("Skipped {}: {}", item.name, reason);
                    reporter.on_item_skipped(&item.name, &reason.to_string());
                    report.skipped.push(SkipRecord {
                        identifier: item.name.clone(),
                        reason,
                    });
                }
            }
        }

        report.skip_log = match self.write_skip_log(&root, &report.skipped) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Failed to write {}: {}", self.config.skip_log_name, e);
                None
            }
        };

        report.duration = start.elapsed();
        reporter.on_restore_complete(
            report.restored,
            report.skipped_count(),
            report.duration.as_secs_f64(),
        );

        Ok(report)
    }

    fn restore_item(
        &self,
        root: &Path,
        item: &StagedItem,
        sidecar: Option<&Path>,
        warnings: &mut usize,
    ) -> Result<PathBuf, SkipReason> {
        let sidecar = sidecar.ok_or(SkipReason::Unmatched)?;
        let record = sidecar::read_sidecar(sidecar)
            .map_err(|e| SkipReason::MalformedSidecar(e.to_string()))?;

        let (folder, public_name) = record.destination().ok_or(SkipReason::MissingFields)?;
        if !restore::is_plain_file_name(public_name) {
            warn!("{}: refusing file name '{}'", item.name, public_name);
            return Err(SkipReason::UnsafeDestination);
        }
        let target_dir = restore::sanitize(root, folder).map_err(|e| {
            warn!("{}: {}", item.name, e);
            SkipReason::UnsafeDestination
        })?;

        fs::create_dir_all(&target_dir).map_err(|e| {
            SkipReason::MoveFailed(format!(
                "failed to create {}: {}",
                target_dir.display(),
                e
            ))
        })?;

        // the skip log is rewritten at the end of the run and must not hold restored data
        let in_root = target_dir == root;
        let skip_log_name = self.config.skip_log_name.as_str();
        let final_name = restore::resolve_unique_name_with(&target_dir, public_name, |name| {
            in_root && name.eq_ignore_ascii_case(skip_log_name)
        });
        let destination = target_dir.join(final_name);
        if !restore::is_contained_destination(root, &target_dir, &destination) {
            warn!("{}: refusing destination {}", item.name, destination.display());
            return Err(SkipReason::UnsafeDestination);
        }

        fs::rename(&item.path, &destination).map_err(|e| {
            SkipReason::MoveFailed(format!(
                "failed to move to {}: {}",
                destination.display(),
                e
            ))
        })?;

        *warnings += self.finalize(&destination, &record, sidecar);
        Ok(destination)
    }

    /// Post-move steps. None of them undo the move; returns how many failed.
    fn finalize(&self, destination: &Path, record: &SidecarRecord, sidecar: &Path) -> usize {
        let mut failures = 0;

        if !self.visibility.clear_hidden(destination) {
            warn!(
                "Failed to remove hidden attribute from {}",
                destination.display()
            );
            failures += 1;
        }

        if let Some(timestamp) = record.creation_time() {
            if let Err(e) = restore::apply_timestamp(destination, timestamp) {
                warn!("Failed to apply timestamp to {}: {}", destination.display(), e);
                failures += 1;
            }
        }

        if let Err(e) = fs::remove_file(sidecar) {
            warn!("Failed to delete sidecar {}: {}", sidecar.display(), e);
            failures += 1;
        }

        failures
    }

    fn write_skip_log(&self, root: &Path, skipped: &[SkipRecord]) -> io::Result<PathBuf> {
        let path = root.join(&self.config.skip_log_name);
        let lines: Vec<String> = skipped.iter().map(SkipRecord::to_string).collect();
        fs::write(&path, lines.join("\n"))?;
        Ok(path)
    }
}
