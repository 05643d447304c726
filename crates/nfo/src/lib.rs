// crates/nfo/src/lib.rs
//! NFO sidecar metadata codec for movie libraries
//!
//! Reads the loosely-structured XML `.nfo` files that media managers keep
//! next to video files, and writes them back in a legacy-compatible form:
//! - detects the text encoding (UTF-8, GBK, Shift_JIS, Windows code pages, ...)
//! - tolerates scalar-or-repeated fields and attributed text nodes
//! - normalizes everything into a [`MovieRecord`]
//! - writes UTF-8 with a byte-order mark, `----` placeholders and a
//!   `" / "`-joined genre tag
//!
//! # Example
//!
//! ```rust
//! use reelshelf_nfo::{MovieRecord, NfoParser, NfoWriter};
//!
//! let nfo = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <movie>
//!   <title>Heat</title>
//!   <uniqueid type="num" default="true">HT-1995</uniqueid>
//!   <genre>Crime</genre>
//!   <actor><name>Al Pacino</name></actor>
//!   <actor><name>Robert De Niro</name></actor>
//! </movie>"#;
//!
//! let record = NfoParser::parse_str(nfo).expect("Failed to parse NFO");
//! assert_eq!(record.actors, vec!["Al Pacino", "Robert De Niro"]);
//!
//! let xml = NfoWriter::new().to_xml_string(&record).expect("Failed to write NFO");
//! assert!(xml.contains("<director>----</director>"));
//! ```

mod encoding;
mod error;
mod movie;
mod parser;
mod value;
mod writer;

pub use encoding::{decode_text, detect_encoding, is_utf8_label, FALLBACK_ENCODING};
pub use error::{NfoError, NfoResult};
pub use movie::{MovieRecord, DEFAULT_PLACEHOLDER, TAG_SEPARATOR};
pub use parser::{parse_metadata_file, NfoParser};
pub use value::{extract_text, XmlElement, XmlValue};
pub use writer::{write_metadata_file, FieldValue, NfoWriter, WriterOptions, BOM};
