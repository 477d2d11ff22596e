//! Certificate metadata document (ERC-721 metadata JSON)
//!
//! The document is built once per `generate` run and never mutated after.
//! Field order in the serialized JSON follows struct order.

use crate::config::CertificateConfig;
use crate::error::Result;
use resonance_common::fs::{ensure_dir, write_atomic};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the certificate inside the metadata directory.
pub const METADATA_FILE_NAME: &str = "resonance_validation_certificate.json";

/// `trait_type` of the build timestamp attribute.
pub const TIMESTAMP_TRAIT: &str = "Timestamp";

/// `display_type` marking an attribute value as epoch seconds.
pub const DISPLAY_TYPE_DATE: &str = "date";

/// ERC-721 metadata document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<Attribute>,
}

/// One `attributes` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Attribute values are either integers or strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl Attribute {
    pub fn text(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: AttributeValue::Text(value.into()),
            display_type: None,
        }
    }

    pub fn date(trait_type: impl Into<String>, epoch_secs: i64) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: AttributeValue::Integer(epoch_secs),
            display_type: Some(DISPLAY_TYPE_DATE.to_string()),
        }
    }
}

impl Document {
    /// Value of the `Timestamp` attribute, if present and numeric
    pub fn timestamp(&self) -> Option<i64> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == TIMESTAMP_TRAIT)
            .and_then(|a| match a.value {
                AttributeValue::Integer(n) => Some(n),
                AttributeValue::Text(_) => None,
            })
    }

    /// Pretty JSON with 2-space indentation. Non-ASCII is written as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Current Unix time in whole seconds
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Build the certificate document stamped with `timestamp`.
pub fn build(certificate: &CertificateConfig, timestamp: i64) -> Document {
    Document {
        name: certificate.name.clone(),
        description: certificate.description.clone(),
        image: certificate.image.clone(),
        external_url: certificate.external_url.clone(),
        attributes: vec![
            Attribute::text("Author", &certificate.author),
            Attribute::text("Repository", &certificate.repository),
            Attribute::text("Root CID", &certificate.root_cid),
            Attribute::text("Protocol", &certificate.protocol),
            Attribute::text("Validation", &certificate.validation),
            Attribute::date(TIMESTAMP_TRAIT, timestamp),
        ],
    }
}

/// Write `document` to `<dir>/resonance_validation_certificate.json`,
/// creating `dir` if needed and replacing any previous file atomically.
pub fn persist(document: &Document, dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;

    let path = dir.join(METADATA_FILE_NAME);
    let json = document.to_json()?;
    write_atomic(&path, json.as_bytes())?;

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TS: i64 = 1_767_225_600;

    #[test]
    fn test_build_uses_certificate_literals() {
        let doc = build(&CertificateConfig::default(), TS);

        assert_eq!(doc.name, "Resonance Validation Certificate");
        assert_eq!(doc.image, "ipfs://QmPlaceholder_ImageCID_ToBeReplaced");
        assert_eq!(doc.external_url, "ipns://resonance-project");

        let traits: Vec<&str> = doc.attributes.iter().map(|a| a.trait_type.as_str()).collect();
        assert_eq!(
            traits,
            ["Author", "Repository", "Root CID", "Protocol", "Validation", "Timestamp"]
        );
        assert_eq!(doc.attributes[4].value, AttributeValue::Text("Triple-Signature Anchor".into()));
    }

    #[test]
    fn test_build_stamps_timestamp_as_date() {
        let doc = build(&CertificateConfig::default(), TS);

        let ts = doc.attributes.last().unwrap();
        assert_eq!(ts.value, AttributeValue::Integer(TS));
        assert_eq!(ts.display_type.as_deref(), Some("date"));
        assert_eq!(doc.timestamp(), Some(TS));
    }

    #[test]
    fn test_build_from_custom_certificate() {
        let cert = CertificateConfig {
            name: "Another Certificate".into(),
            author: "A. N. Other".into(),
            ..CertificateConfig::default()
        };
        let doc = build(&cert, TS);

        assert_eq!(doc.name, "Another Certificate");
        assert_eq!(doc.attributes[0].value.to_string(), "A. N. Other");
    }

    #[test]
    fn test_json_round_trip() {
        let doc = build(&CertificateConfig::default(), TS);
        let parsed: Document = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_json_layout() {
        let cert = CertificateConfig {
            description: "Certificato di validità".into(),
            ..CertificateConfig::default()
        };
        let json = build(&cert, TS).to_json().unwrap();

        assert!(json.starts_with("{\n  \"name\": "));
        assert!(json.contains("\"description\": \"Certificato di validità\""));
        assert!(json.contains("\"value\": 1767225600,\n      \"display_type\": \"date\""));
        // text attributes carry no display_type key
        assert_eq!(json.matches("display_type").count(), 1);

        let name_at = json.find("\"name\"").unwrap();
        let attrs_at = json.find("\"attributes\"").unwrap();
        let url_at = json.find("\"external_url\"").unwrap();
        assert!(name_at < url_at && url_at < attrs_at);
    }

    #[test]
    fn test_persist_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("metadata");
        let doc = build(&CertificateConfig::default(), TS);

        let path = persist(&doc, &dir).unwrap();

        assert_eq!(path, dir.join(METADATA_FILE_NAME));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc.to_json().unwrap());
    }

    #[test]
    fn test_persist_overwrites_previous_build() {
        let temp = TempDir::new().unwrap();
        let cert = CertificateConfig::default();

        let first = build(&cert, TS);
        let second = build(&cert, TS + 1);
        persist(&first, temp.path()).unwrap();
        let path = persist(&second, temp.path()).unwrap();

        let on_disk: Document =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, second);

        // only the timestamp differs between builds
        let mut rewound = on_disk.clone();
        rewound.attributes.last_mut().unwrap().value = AttributeValue::Integer(TS);
        assert_eq!(rewound, first);
    }

    #[test]
    fn test_failed_persist_leaves_existing_certificate() {
        let temp = TempDir::new().unwrap();
        let previous = build(&CertificateConfig::default(), TS);
        let path = persist(&previous, temp.path()).unwrap();
        let before = std::fs::read(&path).unwrap();

        // target name taken by a non-empty directory, so the final rename fails
        let blocked = temp.path().join("blocked");
        std::fs::create_dir_all(blocked.join(METADATA_FILE_NAME).join("keep")).unwrap();
        let result = persist(&build(&CertificateConfig::default(), TS + 1), &blocked);
        assert!(result.is_err());

        // a directory path that runs through the existing certificate file
        let result = persist(&build(&CertificateConfig::default(), TS + 1), &path.join("nested"));
        assert!(result.is_err());

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let leftovers = std::fs::read_dir(&blocked).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file must not survive a failed persist");
    }
}
