use crate::error::TimestampError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use filetime::{set_file_times, FileTime};
use std::path::Path;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp. Values without an offset are read as local time.
pub fn parse_timestamp(value: &str) -> Result<DateTime<chrono::FixedOffset>, TimestampError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimestampError::Parse(value.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| TimestampError::Parse(value.to_string()))
}

/// Set both access and modification time of `path` to `iso_timestamp`.
pub fn apply_timestamp(path: &Path, iso_timestamp: &str) -> Result<(), TimestampError> {
    let dt = parse_timestamp(iso_timestamp)?;
    let time = FileTime::from_unix_time(dt.timestamp(), dt.timestamp_subsec_nanos());
    set_file_times(path, time, time)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_utc_designator() {
        let dt = parse_timestamp("2022-03-01T10:00:00Z").unwrap();
        assert_eq!(dt.timestamp(), 1_646_128_800);
    }

    #[test]
    fn test_parse_offset_and_long_fraction() {
        let dt = parse_timestamp("2022-03-01T12:00:00.1234567+02:00").unwrap();
        assert_eq!(dt.timestamp(), 1_646_128_800);
        assert_eq!(dt.timestamp_subsec_nanos(), 123_456_700);
    }

    #[test]
    fn test_parse_without_offset_uses_local_time() {
        let dt = parse_timestamp("2022-03-01T10:00:00").unwrap();
        let expected = Local
            .with_ymd_and_hms(2022, 3, 1, 10, 0, 0)
            .earliest()
            .unwrap();
        assert_eq!(dt.timestamp(), expected.timestamp());
    }

    #[test]
    fn test_parse_date_only() {
        assert!(parse_timestamp("2022-03-01").is_ok());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(TimestampError::Parse(_))
        ));
    }

    #[test]
    fn test_apply_sets_mtime_and_atime() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("file");
        fs::write(&path, "data").unwrap();

        apply_timestamp(&path, "2022-03-01T10:00:00Z").unwrap();

        let meta = fs::metadata(&path).unwrap();
        let mtime = FileTime::from_last_modification_time(&meta);
        let atime = FileTime::from_last_access_time(&meta);
        assert_eq!(mtime.unix_seconds(), 1_646_128_800);
        assert_eq!(atime.unix_seconds(), 1_646_128_800);
    }

    #[test]
    fn test_apply_missing_file_is_io_error() {
        let tmp = tempdir().unwrap();
        let result = apply_timestamp(&tmp.path().join("gone"), "2022-03-01T10:00:00Z");
        assert!(matches!(result, Err(TimestampError::Io(_))));
    }
}
