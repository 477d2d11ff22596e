//! ERC-721 metadata validation
//!
//! Works on raw JSON rather than [`crate::Document`] so malformed files can
//! still be diagnosed field by field. Every check runs and is reported; only a
//! missing file or unparseable JSON stops early.
//!
//! Hard failures: a missing required field, `attributes` that is not an
//! array, or an attribute entry that is not an object with both `trait_type`
//! and `value`. Empty required values and URL schemes are reported but never
//! fail.

use crate::commands::rule;
use crate::error::{CliError, Result};
use colored::Colorize;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::path::Path;

pub const REQUIRED_FIELDS: [&str; 3] = ["name", "description", "image"];
pub const OPTIONAL_FIELDS: [&str; 3] = ["external_url", "attributes", "background_color"];
pub const IMAGE_SCHEME: &str = "ipfs://";
pub const EXTERNAL_URL_SCHEMES: [&str; 3] = ["ipfs://", "ipns://", "https://"];

/// Presence check for a required field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField {
    pub field: &'static str,
    pub present: bool,
    /// Present but null, false, zero, or an empty string/array/object
    pub empty: bool,
}

/// Presence check for an optional field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalField {
    pub field: &'static str,
    pub present: bool,
}

/// Shape check for one `attributes` entry (index is 1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeCheck {
    Valid {
        index: usize,
        trait_type: String,
        value: String,
    },
    MissingKeys {
        index: usize,
    },
    NotAnObject {
        index: usize,
    },
}

impl AttributeCheck {
    pub fn passed(&self) -> bool {
        matches!(self, AttributeCheck::Valid { .. })
    }
}

/// Shape check for the `attributes` field as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributesCheck {
    NotAnArray,
    Entries(Vec<AttributeCheck>),
}

/// Informational scheme check of a URL field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeCheck {
    /// Field value as displayed, `None` when absent
    pub value: Option<String>,
    pub accepted: bool,
}

/// Full result of validating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub required: Vec<RequiredField>,
    pub optional: Vec<OptionalField>,
    /// `None` when the document has no `attributes` field
    pub attributes: Option<AttributesCheck>,
    pub image: SchemeCheck,
    pub external_url: SchemeCheck,
}

impl ValidationReport {
    /// Number of hard failures
    pub fn failure_count(&self) -> usize {
        let missing = self.required.iter().filter(|r| !r.present).count();
        let attributes = match &self.attributes {
            None => 0,
            Some(AttributesCheck::NotAnArray) => 1,
            Some(AttributesCheck::Entries(entries)) => entries.iter().filter(|e| !e.passed()).count(),
        };
        missing + attributes
    }

    pub fn passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Human-readable trace of every check
    pub fn render(&self) -> String {
        let mut out = String::new();
        // fmt::Write into a String cannot fail
        let _ = self.write_report(&mut out);
        out
    }

    fn write_report(&self, out: &mut String) -> std::fmt::Result {
        let ok = "✓".green();
        let bad = "✗".red();
        let warn = "⚠".yellow();
        let line = rule('=');

        writeln!(out, "{}", line)?;
        writeln!(out, "{}", "ERC-721 METADATA VALIDATION".bold())?;
        writeln!(out, "{}", line)?;
        writeln!(out, "{} Valid JSON format", ok)?;

        writeln!(out, "\nRequired Fields:")?;
        for check in &self.required {
            if check.present {
                writeln!(out, "  {} {}: Present", ok, check.field)?;
                if check.empty {
                    writeln!(out, "    {} Warning: {} is empty", warn, check.field)?;
                }
            } else {
                writeln!(out, "  {} {}: Missing", bad, check.field)?;
            }
        }

        writeln!(out, "\nOptional Fields:")?;
        for check in self.optional.iter().filter(|c| c.present) {
            writeln!(out, "  {} {}: Present", ok, check.field)?;
        }

        if let Some(attributes) = &self.attributes {
            writeln!(out, "\nAttributes Validation:")?;
            match attributes {
                AttributesCheck::NotAnArray => {
                    writeln!(out, "  {} Attributes is not an array", bad)?;
                },
                AttributesCheck::Entries(entries) => {
                    writeln!(out, "  {} Attributes is an array ({} items)", ok, entries.len())?;
                    for entry in entries {
                        match entry {
                            AttributeCheck::Valid {
                                index,
                                trait_type,
                                value,
                            } => writeln!(out, "  {} Attribute {}: {} = {}", ok, index, trait_type, value)?,
                            AttributeCheck::MissingKeys { index } => {
                                writeln!(out, "  {} Attribute {}: Missing trait_type or value", bad, index)?
                            },
                            AttributeCheck::NotAnObject { index } => {
                                writeln!(out, "  {} Attribute {}: Not an object", bad, index)?
                            },
                        }
                    }
                },
            }
        }

        writeln!(out, "\nIPFS/IPNS URL Validation:")?;
        if self.image.accepted {
            writeln!(out, "  {} Image uses IPFS protocol", ok)?;
        } else {
            writeln!(
                out,
                "  {} Image does not use IPFS protocol (using: {})",
                warn,
                self.image.value.as_deref().unwrap_or("N/A")
            )?;
        }
        if self.external_url.accepted {
            writeln!(out, "  {} External URL uses valid protocol", ok)?;
        } else {
            writeln!(
                out,
                "  {} External URL protocol: {}",
                warn,
                self.external_url.value.as_deref().unwrap_or("N/A")
            )?;
        }

        writeln!(out, "\n{}", line)?;
        if self.passed() {
            writeln!(out, "VALIDATION RESULT: {}", "✓ PASSED".green().bold())?;
            writeln!(out, "The metadata is valid ERC-721 format!")?;
        } else {
            writeln!(out, "VALIDATION RESULT: {}", "✗ FAILED".red().bold())?;
            writeln!(out, "The metadata has validation errors.")?;
        }
        writeln!(out, "{}", line)?;

        Ok(())
    }
}

/// Read and parse the metadata file
pub fn load_metadata(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(CliError::metadata_not_found(path));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::invalid_json(path, e.to_string()))
}

/// Load `path` and validate it
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let value = load_metadata(path)?;
    let report = validate_value(&value);

    tracing::info!(
        path = %path.display(),
        failures = report.failure_count(),
        passed = report.passed(),
        "Validated metadata"
    );

    Ok(report)
}

/// Run every check against a parsed document.
///
/// A top-level value that is not an object has no fields, so all required
/// fields count as missing.
pub fn validate_value(value: &Value) -> ValidationReport {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);

    let required = REQUIRED_FIELDS
        .iter()
        .map(|&field| match fields.get(field) {
            Some(v) => RequiredField {
                field,
                present: true,
                empty: is_empty_value(v),
            },
            None => RequiredField {
                field,
                present: false,
                empty: false,
            },
        })
        .collect();

    let optional = OPTIONAL_FIELDS
        .iter()
        .map(|&field| OptionalField {
            field,
            present: fields.contains_key(field),
        })
        .collect();

    let attributes = fields.get("attributes").map(check_attributes);

    ValidationReport {
        required,
        optional,
        attributes,
        image: scheme_check(fields.get("image"), &[IMAGE_SCHEME]),
        external_url: scheme_check(fields.get("external_url"), &EXTERNAL_URL_SCHEMES),
    }
}

fn check_attributes(value: &Value) -> AttributesCheck {
    let Some(entries) = value.as_array() else {
        return AttributesCheck::NotAnArray;
    };

    let checks = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = i + 1;
            match entry.as_object() {
                None => AttributeCheck::NotAnObject { index },
                Some(obj) => match (obj.get("trait_type"), obj.get("value")) {
                    (Some(trait_type), Some(value)) => AttributeCheck::Valid {
                        index,
                        trait_type: display_value(trait_type),
                        value: display_value(value),
                    },
                    _ => AttributeCheck::MissingKeys { index },
                },
            }
        })
        .collect();

    AttributesCheck::Entries(checks)
}

fn scheme_check(value: Option<&Value>, schemes: &[&str]) -> SchemeCheck {
    let accepted = value
        .and_then(Value::as_str)
        .is_some_and(|s| schemes.iter().any(|scheme| s.starts_with(scheme)));

    SchemeCheck {
        value: value.map(display_value),
        accepted,
    }
}

// JSON "falsy" values.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// Strings print without quotes, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
