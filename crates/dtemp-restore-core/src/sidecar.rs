use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
}

/// Metadata written next to each staged file. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarRecord {
    #[serde(rename = "ArchivedFullName")]
    pub archived_full_name: Option<String>,
    #[serde(rename = "PublicName")]
    pub public_name: Option<String>,
    #[serde(rename = "CreationTime")]
    pub creation_time: Option<String>,
}

impl SidecarRecord {
    /// Destination folder and file name, if both are present and non-empty.
    pub fn destination(&self) -> Option<(&str, &str)> {
        let folder = self.archived_full_name.as_deref().filter(|s| !s.is_empty())?;
        let name = self.public_name.as_deref().filter(|s| !s.is_empty())?;
        Some((folder, name))
    }

    pub fn creation_time(&self) -> Option<&str> {
        self.creation_time.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// UTF-8 first (BOM tolerated), then a byte-per-char single-byte fallback.
pub fn decode_sidecar(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn parse_sidecar(text: &str) -> Result<SidecarRecord, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn read_sidecar(path: &Path) -> Result<SidecarRecord, SidecarError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bytes = fs::read(path).map_err(|source| SidecarError::Io {
        name: name.clone(),
        source,
    })?;

    parse_sidecar(&decode_sidecar(&bytes)).map_err(|source| SidecarError::Parse { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record_ignores_unknown_fields() {
        let record = parse_sidecar(
            r#"{
                "ArchivedFullName": "Documents/Reports",
                "PublicName": "Q1.pdf",
                "CreationTime": "2022-03-01T10:00:00Z",
                "Size": 1024,
                "Owner": {"Sid": "S-1-5-21"}
            }"#,
        )
        .unwrap();
        assert_eq!(record.destination(), Some(("Documents/Reports", "Q1.pdf")));
        assert_eq!(record.creation_time(), Some("2022-03-01T10:00:00Z"));
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let record = parse_sidecar(r#"{"ArchivedFullName": "Docs"}"#).unwrap();
        assert!(record.destination().is_none());

        let record = parse_sidecar(r#"{"ArchivedFullName": "", "PublicName": "a.txt"}"#).unwrap();
        assert!(record.destination().is_none());

        let record =
            parse_sidecar(r#"{"ArchivedFullName": "Docs", "PublicName": "a.txt", "CreationTime": null}"#)
                .unwrap();
        assert!(record.creation_time().is_none());
    }

    #[test]
    fn test_not_json() {
        assert!(parse_sidecar("ArchivedFullName=Docs").is_err());
        assert!(parse_sidecar(r#"["Docs", "a.txt"]"#).is_err());
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"PublicName": "a.txt"}"#);
        let record = parse_sidecar(&decode_sidecar(&bytes)).unwrap();
        assert_eq!(record.public_name.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_decode_single_byte_fallback() {
        // "Résumé.doc" in a single-byte code page
        let bytes = b"{\"ArchivedFullName\": \"Docs\", \"PublicName\": \"R\xe9sum\xe9.doc\"}";
        let record = parse_sidecar(&decode_sidecar(bytes)).unwrap();
        assert_eq!(record.public_name.as_deref(), Some("Résumé.doc"));
    }
}
