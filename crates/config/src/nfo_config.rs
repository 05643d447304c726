//! NFO writer configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Largest indent the writer accepts
pub const MAX_INDENT: usize = 8;

/// Settings applied when NFO files are written
///
/// Decoding is not configurable: every file is read the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NfoConfig {
    /// Text written for a missing director or studio
    pub placeholder: String,

    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,

    /// Prefix files with a UTF-8 byte-order mark
    pub write_bom: bool,

    /// Add `xmlns:xsi`/`xmlns:xsd` to the root element
    pub schema_namespaces: bool,
}

impl Default for NfoConfig {
    fn default() -> Self {
        Self {
            placeholder: "----".to_string(),
            indent: 2,
            write_bom: true,
            schema_namespaces: true,
        }
    }
}

impl ConfigSection for NfoConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::not_empty(&self.placeholder, "nfo.placeholder"),
            Validator::single_line(&self.placeholder, "nfo.placeholder"),
            Validator::in_range(self.indent, 0, MAX_INDENT, "nfo.indent"),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.placeholder = other.placeholder;
        self.indent = other.indent;
        self.write_bom = other.write_bom;
        self.schema_namespaces = other.schema_namespaces;
    }

    fn section_name(&self) -> &'static str {
        "nfo"
    }
}
