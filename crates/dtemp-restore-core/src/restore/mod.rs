pub mod naming;
pub mod sanitize;
pub mod timestamp;

pub use naming::{resolve_unique_name, resolve_unique_name_with};
pub use sanitize::{is_contained_destination, is_plain_file_name, sanitize};
pub use timestamp::{apply_timestamp, parse_timestamp};
