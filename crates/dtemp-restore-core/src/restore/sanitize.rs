use crate::error::PathRejected;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Lexically collapse `.` and `..` segments. A `..` directly under the root or a
/// drive prefix is dropped, a leading `..` on a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Resolve an archived relative folder against `root`, rejecting anything that
/// would land outside of it.
pub fn sanitize(root: &Path, archived_relative_path: &str) -> Result<PathBuf, PathRejected> {
    let native: String = archived_relative_path
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();

    let relative = normalize(Path::new(&native));
    let root = normalize(root);
    let target = normalize(&root.join(relative));

    if target.starts_with(&root) {
        Ok(target)
    } else {
        Err(PathRejected {
            path: archived_relative_path.to_string(),
        })
    }
}

/// A restored file name must be exactly one normal path component. Separators,
/// dot names, drive prefixes and (on Windows) stream suffixes are refused.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    if cfg!(windows) && name.contains(':') {
        return false;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part.to_str() == Some(name),
        _ => false,
    }
}

/// `destination` must sit directly in `target_dir`, and both inside `root`.
pub fn is_contained_destination(root: &Path, target_dir: &Path, destination: &Path) -> bool {
    destination.parent() == Some(target_dir)
        && target_dir.starts_with(root)
        && destination.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\staging")
        } else {
            PathBuf::from("/staging")
        }
    }

    #[test]
    fn test_nested_relative_path() {
        let target = sanitize(&root(), "Documents/Reports").unwrap();
        assert_eq!(target, root().join("Documents").join("Reports"));
    }

    #[test]
    fn test_mixed_separators_and_whitespace() {
        let target = sanitize(&root(), "  Documents\\Reports/2022 ").unwrap();
        assert_eq!(target, root().join("Documents").join("Reports").join("2022"));
    }

    #[test]
    fn test_dot_segments_collapse_inside_root() {
        let target = sanitize(&root(), "a/./b/../c").unwrap();
        assert_eq!(target, root().join("a").join("c"));
    }

    #[test]
    fn test_empty_path_is_root() {
        assert_eq!(sanitize(&root(), "   ").unwrap(), root());
    }

    #[test]
    fn test_parent_traversal_rejected() {
        for malicious in ["../../etc", "..", "a/../../b", "Docs\\..\\..\\..\\Windows"] {
            assert!(
                sanitize(&root(), malicious).is_err(),
                "expected rejection for {}",
                malicious
            );
        }
    }

    #[test]
    fn test_dotted_names_are_not_traversal() {
        let target = sanitize(&root(), "..hidden/x..y").unwrap();
        assert_eq!(target, root().join("..hidden").join("x..y"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_outside_root_rejected() {
        assert!(sanitize(&root(), "/etc/cron.d").is_err());
    }

    #[test]
    fn test_sibling_with_common_prefix_rejected() {
        // "/staging-evil" shares a string prefix with "/staging" but not a component prefix
        assert!(sanitize(&root(), "../staging-evil").is_err());
    }

    #[test]
    fn test_plain_file_name() {
        assert!(is_plain_file_name("Q1.pdf"));
        assert!(is_plain_file_name(".bashrc"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../evil.txt"));
        assert!(!is_plain_file_name("sub\\evil.txt"));
    }

    #[test]
    fn test_destination_must_stay_in_target_dir() {
        let target_dir = root().join("Docs");
        assert!(is_contained_destination(
            &root(),
            &target_dir,
            &target_dir.join("a.txt")
        ));
        assert!(!is_contained_destination(
            &root(),
            &target_dir,
            &root().join("a.txt")
        ));
    }

    #[cfg(windows)]
    #[test]
    fn test_drive_relative_and_stream_names_rejected() {
        assert!(!is_plain_file_name("C:evil.txt"));
        assert!(!is_plain_file_name("a.txt:stream"));
        assert!(!is_plain_file_name(r"\\?\C:\evil.txt"));

        // joining a prefixed name would replace the whole directory
        let target_dir = root().join("Docs");
        let escaped = target_dir.join("C:evil.txt");
        assert!(!is_contained_destination(&root(), &target_dir, &escaped));
    }
}
