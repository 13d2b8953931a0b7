extern crate winapi;

use super::VisibilityNormalizer;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use winapi::um::fileapi::{GetFileAttributesW, SetFileAttributesW, INVALID_FILE_ATTRIBUTES};
use winapi::um::winnt::FILE_ATTRIBUTE_HIDDEN;

pub struct WindowsVisibility;

fn to_wide(path: &Path) -> Vec<u16> {
    path.as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

impl VisibilityNormalizer for WindowsVisibility {
    fn clear_hidden(&self, path: &Path) -> bool {
        let path_wide = to_wide(path);

        unsafe {
            let attrs = GetFileAttributesW(path_wide.as_ptr());
            if attrs == INVALID_FILE_ATTRIBUTES {
                return false;
            }
            if attrs & FILE_ATTRIBUTE_HIDDEN == 0 {
                return true;
            }
            SetFileAttributesW(path_wide.as_ptr(), attrs & !FILE_ATTRIBUTE_HIDDEN) != 0
        }
    }
}
