use glob::Pattern;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use walkdir::WalkDir;

/// An extensionless data file waiting in the staging root.
#[derive(Debug, Clone)]
pub struct StagedItem {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct StagingListing {
    /// Every top-level entry, files and directories alike.
    pub entries: usize,
    pub candidates: Vec<StagedItem>,
    pub sidecars: Vec<PathBuf>,
}

pub fn compile_ignore_patterns(ignore_globs: &[String]) -> Vec<Pattern> {
    ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

pub fn is_sidecar_name(name: &str, sidecar_extension: &str) -> bool {
    let suffix = format!(".{}", sidecar_extension.to_lowercase());
    let name = name.to_lowercase();
    name.len() > suffix.len() && name.ends_with(&suffix)
}

pub fn is_candidate_name(name: &str, ignore_patterns: &[Pattern]) -> bool {
    !name.is_empty()
        && !name.contains('.')
        && !ignore_patterns.iter().any(|pattern| pattern.matches(name))
}

/// The portion of a sidecar name that identifies its data file.
pub fn sidecar_key(sidecar_name: &str) -> &str {
    sidecar_name.split('.').next().unwrap_or(sidecar_name)
}

/// List the immediate entries of `root` in file-name order and split them into
/// candidates and sidecars. Directories are counted but never processed.
pub fn list_staging(
    root: &Path,
    sidecar_extension: &str,
    ignore_patterns: &[Pattern],
) -> io::Result<StagingListing> {
    let mut listing = StagingListing::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        listing.entries += 1;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_sidecar_name(&name, sidecar_extension) {
            listing.sidecars.push(entry.into_path());
        } else if is_candidate_name(&name, ignore_patterns) {
            listing.candidates.push(StagedItem {
                name,
                path: entry.into_path(),
            });
        }
    }

    Ok(listing)
}

/// Index sidecars by key. The first sidecar in listing order wins a shared key.
pub fn build_sidecar_index(sidecars: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::with_capacity(sidecars.len());

    for sidecar in sidecars {
        let name = match sidecar.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        match index.entry(sidecar_key(&name).to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(sidecar.clone());
            }
            Entry::Occupied(existing) => {
                warn!(
                    "Ignoring {} - {} already claims the same data file",
                    name,
                    existing.get().display()
                );
            }
        }
    }

    index
}
