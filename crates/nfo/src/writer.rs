// crates/nfo/src/writer.rs
//! NFO encoding: [`MovieRecord`] to XML bytes
//!
//! Output matches what older catalog tools wrote, so files produced here
//! stay readable by them: a UTF-8 byte-order mark, a standalone XML
//! declaration, `----` for a missing director or studio, and genres written
//! both as repeated `<genre>` elements and as one `" / "`-joined `<tag>`.

use crate::error::{NfoError, NfoResult};
use crate::movie::{MovieRecord, DEFAULT_PLACEHOLDER};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;

/// Byte-order mark prefixed to every written file
pub const BOM: char = '\u{FEFF}';

const ROOT_ELEMENT: &str = "movie";
const SCHEMA_NAMESPACES: [(&str, &str); 2] = [
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"),
];
const UNIQUEID_ATTRIBUTES: [(&str, &str); 2] = [("type", "num"), ("default", "true")];

/// Output formatting settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Written in place of a missing director or studio
    pub placeholder: String,
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,
    /// Prefix the output with a UTF-8 byte-order mark
    pub write_bom: bool,
    /// Declare the `xsi`/`xsd` namespaces on the root element
    pub schema_namespaces: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            indent: 2,
            write_bom: true,
            schema_namespaces: true,
        }
    }
}

/// Shape of one output field before serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single element with text content
    Text(String),
    /// The same element repeated once per value
    Repeated(Vec<String>),
    /// An element with fixed attributes and text content
    Attributed {
        attributes: Vec<(&'static str, &'static str)>,
        text: String,
    },
    /// The same element repeated, each holding its own child elements
    Records(Vec<Vec<(&'static str, String)>>),
}

/// NFO writer
#[derive(Debug, Clone, Default)]
pub struct NfoWriter {
    options: WriterOptions,
}

impl NfoWriter {
    /// Creates a writer with the legacy-compatible defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with custom formatting
    pub fn with_options(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Maps a record onto the output fields, in output order.
    ///
    /// `None` marks a field that is left out of the document entirely.
    pub fn shape(&self, record: &MovieRecord) -> Vec<(&'static str, Option<FieldValue>)> {
        let genre = match record.genres.as_slice() {
            [] => None,
            [single] => Some(FieldValue::Text(single.clone())),
            many => Some(FieldValue::Repeated(many.to_vec())),
        };

        let actor = (!record.actors.is_empty()).then(|| {
            FieldValue::Records(
                record
                    .actors
                    .iter()
                    .map(|name| vec![("name", name.clone())])
                    .collect(),
            )
        });

        vec![
            ("title", Some(FieldValue::Text(record.title.clone()))),
            (
                "runtime",
                record.runtime.map(|minutes| FieldValue::Text(minutes.to_string())),
            ),
            (
                "uniqueid",
                Some(FieldValue::Attributed {
                    attributes: UNIQUEID_ATTRIBUTES.to_vec(),
                    text: record.code.clone(),
                }),
            ),
            ("genre", genre),
            ("tag", record.tag_line().map(FieldValue::Text)),
            ("director", Some(self.or_placeholder(record.director.as_deref()))),
            (
                "premiered",
                record
                    .premiered
                    .as_ref()
                    .filter(|date| !date.is_empty())
                    .map(|date| FieldValue::Text(date.clone())),
            ),
            ("studio", Some(self.or_placeholder(record.studio.as_deref()))),
            ("actor", actor),
        ]
    }

    /// Serializes a record to an XML document, without the byte-order mark
    pub fn to_xml_string(&self, record: &MovieRecord) -> NfoResult<String> {
        let mut writer = match self.options.indent {
            0 => Writer::new(Vec::new()),
            indent => Writer::new_with_indent(Vec::new(), b' ', indent),
        };

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
        )?;

        let mut root = BytesStart::new(ROOT_ELEMENT);
        if self.options.schema_namespaces {
            for attribute in SCHEMA_NAMESPACES {
                root.push_attribute(attribute);
            }
        }
        write(&mut writer, Event::Start(root))?;

        for (name, value) in self.shape(record) {
            if let Some(value) = value {
                write_field(&mut writer, name, &value)?;
            }
        }

        write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

        String::from_utf8(writer.into_inner()).map_err(|e| NfoError::Serialize(e.to_string()))
    }

    /// Serializes a record to the exact bytes written to disk
    pub fn to_bytes(&self, record: &MovieRecord) -> NfoResult<Vec<u8>> {
        let xml = self.to_xml_string(record)?;
        let mut out = String::with_capacity(xml.len() + BOM.len_utf8());
        if self.options.write_bom {
            out.push(BOM);
        }
        out.push_str(&xml);
        Ok(out.into_bytes())
    }

    /// Writes a record to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created first.
    pub async fn write_file(&self, path: impl AsRef<Path>, record: &MovieRecord) -> NfoResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(source) = tokio::fs::create_dir_all(parent).await {
                log::error!("Failed to create directory {}: {}", parent.display(), source);
                return Err(NfoError::DirectoryCreationError {
                    path: parent.to_path_buf(),
                    source,
                });
            }
        }

        let bytes = self.to_bytes(record).map_err(|err| {
            log::error!("Failed to encode NFO file {}: {}", path.display(), err);
            err.with_path(path)
        })?;

        if let Err(source) = tokio::fs::write(path, bytes).await {
            log::error!("Failed to write NFO file {}: {}", path.display(), source);
            return Err(NfoError::WriteError {
                path: path.to_path_buf(),
                source,
            });
        }

        log::info!("NFO file written: {}", path.display());
        Ok(())
    }

    fn or_placeholder(&self, value: Option<&str>) -> FieldValue {
        let text = value
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.options.placeholder);
        FieldValue::Text(text.to_string())
    }
}

/// Writes a record to `path` with the default formatting
pub async fn write_metadata_file(path: impl AsRef<Path>, record: &MovieRecord) -> NfoResult<()> {
    NfoWriter::new().write_file(path, record).await
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> NfoResult<()> {
    writer
        .write_event(event)
        .map_err(|e| NfoError::Serialize(e.to_string()))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> NfoResult<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }

    if text.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &FieldValue) -> NfoResult<()> {
    match value {
        FieldValue::Text(text) => write_text_element(writer, name, &[], text),
        FieldValue::Repeated(items) => items
            .iter()
            .try_for_each(|item| write_text_element(writer, name, &[], item)),
        FieldValue::Attributed { attributes, text } => {
            write_text_element(writer, name, attributes, text)
        }
        FieldValue::Records(records) => records.iter().try_for_each(|children| {
            write(writer, Event::Start(BytesStart::new(name)))?;
            for (child, text) in children {
                write_text_element(writer, child, &[], text)?;
            }
            write(writer, Event::End(BytesEnd::new(name)))
        }),
    }
}
