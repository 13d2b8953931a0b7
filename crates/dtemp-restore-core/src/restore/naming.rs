use std::path::Path;

fn split_name(name: &str) -> (&str, &str) {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(_), Some(ext)) => {
            let ext_len = ext.len() + 1;
            name.split_at(name.len() - ext_len)
        }
        _ => (name, ""),
    }
}

fn is_taken(target_dir: &Path, name: &str) -> bool {
    // symlink_metadata so a dangling link still counts as taken
    target_dir.join(name).symlink_metadata().is_ok()
}

/// Return `desired_name` if it is free in `target_dir`, otherwise the first free
/// `"{stem} (k){ext}"` with k counting up from 1.
pub fn resolve_unique_name(target_dir: &Path, desired_name: &str) -> String {
    resolve_unique_name_with(target_dir, desired_name, |_| false)
}

/// Like `resolve_unique_name`, but names for which `reserved` returns true are
/// treated as taken even when nothing exists on disk yet.
pub fn resolve_unique_name_with<F>(target_dir: &Path, desired_name: &str, reserved: F) -> String
where
    F: Fn(&str) -> bool,
{
    let taken = |name: &str| reserved(name) || is_taken(target_dir, name);

    if !taken(desired_name) {
        return desired_name.to_string();
    }

    let (stem, ext) = split_name(desired_name);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, counter, ext);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
