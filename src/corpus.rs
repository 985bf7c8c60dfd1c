//! Corpus records and thin I/O wrappers.
//!
//! Documents arrive as JSON-lines records; [`Records`] decodes them from
//! any [`BufRead`] with configurable field names ([`FieldMap`]). The core
//! pipeline never touches files itself; these helpers are the boundary.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VectorizarError};
use crate::textmodel::TextModel;

/// One corpus record: text plus optional class label and numeric value.
///
/// Only [`crate::weighting::WeightingScheme::Entropy`] consumes `klass`;
/// `value` is carried for external consumers (e.g. regression targets).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw document text.
    pub text: String,
    /// Class label, if present.
    pub klass: Option<String>,
    /// Numeric value, if present.
    pub value: Option<f64>,
}

impl Document {
    /// A document with text only.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            klass: None,
            value: None,
        }
    }

    /// Attach a class label.
    #[must_use]
    pub fn with_klass(mut self, klass: impl Into<String>) -> Self {
        self.klass = Some(klass.into());
        self
    }

    /// Attach a numeric value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Field names used to extract a [`Document`] from a JSON record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Text field name; always required.
    pub text: String,
    /// Class-label field name; optional per record.
    pub klass: String,
    /// Numeric-value field name; optional per record.
    pub value: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            text: "text".to_string(),
            klass: "klass".to_string(),
            value: "value".to_string(),
        }
    }
}

impl FieldMap {
    fn extract(&self, record: &Value) -> Result<Document> {
        let text = record
            .get(&self.text)
            .and_then(Value::as_str)
            .ok_or_else(|| VectorizarError::missing_field(&self.text))?
            .to_string();

        // Labels may arrive as strings or numbers; both are usable keys.
        let klass = record.get(&self.klass).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let value = record.get(&self.value).and_then(Value::as_f64);

        Ok(Document { text, klass, value })
    }
}

/// Iterator over JSON-lines records, one [`Document`] per non-empty line.
///
/// # Examples
///
/// ```
/// use vectorizar::corpus::{FieldMap, Records};
///
/// let data = br#"{"text": "buenos dias", "klass": "pos"}
/// {"text": "odio los lunes", "klass": "neg"}
/// "#;
/// let docs: Result<Vec<_>, _> = Records::new(&data[..], FieldMap::default()).collect();
/// let docs = docs.unwrap();
/// assert_eq!(docs.len(), 2);
/// assert_eq!(docs[0].klass.as_deref(), Some("pos"));
/// ```
pub struct Records<R: BufRead> {
    lines: Lines<R>,
    fields: FieldMap,
    lineno: usize,
}

impl<R: BufRead> Records<R> {
    /// Decode records from `reader` using the given field names.
    pub fn new(reader: R, fields: FieldMap) -> Self {
        Self {
            lines: reader.lines(),
            fields,
            lineno: 0,
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.lineno += 1;
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.trim().is_empty() {
                continue;
            }
            let record: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    return Some(Err(VectorizarError::Serialization(format!(
                        "line {}: {e}",
                        self.lineno
                    ))))
                }
            };
            return Some(self.fields.extract(&record));
        }
    }
}

/// Read all documents from a JSON-lines file with default field names.
pub fn read_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    read_documents_with(path, FieldMap::default())
}

/// Read all documents from a JSON-lines file with custom field names.
pub fn read_documents_with<P: AsRef<Path>>(path: P, fields: FieldMap) -> Result<Vec<Document>> {
    let file = File::open(path)?;
    Records::new(BufReader::new(file), fields).collect()
}

/// Persist a fit model to a file.
pub fn save_model<P: AsRef<Path>>(model: &TextModel, path: P) -> Result<()> {
    let bytes = model.to_bytes()?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}

/// Restore a model persisted with [`save_model`].
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<TextModel> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    TextModel::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_default_fields() {
        let data = br#"{"text": "hola", "klass": "x", "value": 1.5}
{"text": "adios"}
"#;
        let docs: Vec<Document> = Records::new(&data[..], FieldMap::default())
            .collect::<Result<_>>()
            .expect("decode should succeed");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "hola");
        assert_eq!(docs[0].klass.as_deref(), Some("x"));
        assert_eq!(docs[0].value, Some(1.5));
        assert_eq!(docs[1].klass, None);
        assert_eq!(docs[1].value, None);
    }

    #[test]
    fn test_records_skip_blank_lines() {
        let data = b"\n{\"text\": \"uno\"}\n\n{\"text\": \"dos\"}\n\n";
        let docs: Vec<Document> = Records::new(&data[..], FieldMap::default())
            .collect::<Result<_>>()
            .expect("decode should succeed");
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_missing_text_field_names_the_field() {
        let data = br#"{"body": "hola"}"#;
        let err = Records::new(&data[..], FieldMap::default())
            .next()
            .expect("one record")
            .expect_err("text field is missing");
        assert!(err.to_string().contains("text"), "got: {err}");
    }

    #[test]
    fn test_custom_field_map() {
        let fields = FieldMap {
            text: "body".to_string(),
            klass: "label".to_string(),
            value: "score".to_string(),
        };
        let data = br#"{"body": "hola", "label": "pos", "score": 0.9}"#;
        let docs: Vec<Document> = Records::new(&data[..], fields)
            .collect::<Result<_>>()
            .expect("decode should succeed");
        assert_eq!(docs[0].text, "hola");
        assert_eq!(docs[0].klass.as_deref(), Some("pos"));
        assert_eq!(docs[0].value, Some(0.9));
    }

    #[test]
    fn test_numeric_klass_stringified() {
        let data = br#"{"text": "hola", "klass": 2}"#;
        let docs: Vec<Document> = Records::new(&data[..], FieldMap::default())
            .collect::<Result<_>>()
            .expect("decode should succeed");
        assert_eq!(docs[0].klass.as_deref(), Some("2"));
    }

    #[test]
    fn test_malformed_json_reports_line() {
        let data = b"{\"text\": \"ok\"}\nnot json\n";
        let results: Vec<Result<Document>> =
            Records::new(&data[..], FieldMap::default()).collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().expect_err("second line is malformed");
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn test_document_builders() {
        let doc = Document::new("hola").with_klass("pos").with_value(2.0);
        assert_eq!(doc.klass.as_deref(), Some("pos"));
        assert_eq!(doc.value, Some(2.0));
    }
}
