// crates/nfo/src/parser.rs
//! NFO decoding: bytes to [`MovieRecord`]

use crate::encoding::{decode_text, detect_encoding};
use crate::error::{NfoError, NfoResult};
use crate::movie::MovieRecord;
use crate::value::{extract_text, XmlValue};
use std::path::Path;

/// NFO parser
#[derive(Debug, Clone, Copy, Default)]
pub struct NfoParser;

impl NfoParser {
    /// Reads and decodes an NFO file.
    ///
    /// Errors are tagged with `path`. No partial record is returned.
    pub async fn parse_file(path: impl AsRef<Path>) -> NfoResult<MovieRecord> {
        let path = path.as_ref();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                log::error!("Failed to read NFO file {}: {}", path.display(), source);
                return Err(NfoError::ReadError {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse_bytes(&bytes).map_err(|err| {
            log::error!("Failed to parse NFO file {}: {}", path.display(), err);
            err.with_path(path)
        })
    }

    /// Decodes raw file bytes in whatever encoding they were written in
    pub fn parse_bytes(bytes: &[u8]) -> NfoResult<MovieRecord> {
        let encoding = detect_encoding(bytes);
        log::debug!("Detected {} encoding ({} bytes)", encoding, bytes.len());

        let content = decode_text(bytes, &encoding);
        Self::parse_str(&content)
    }

    /// Decodes an NFO document that is already text
    pub fn parse_str(content: &str) -> NfoResult<MovieRecord> {
        let root = XmlValue::parse(content)?;
        let movie = Self::movie_node(&root);

        Ok(MovieRecord {
            title: extract_text(movie.get("title")),
            code: extract_text(movie.get("uniqueid")),
            runtime: movie
                .get("runtime")
                .and_then(|value| parse_runtime(&extract_text(Some(value)))),
            premiered: optional_text(movie.get("premiered")),
            director: optional_text(movie.get("director")),
            studio: optional_text(movie.get("studio")),
            actors: Self::extract_actors(movie),
            genres: Self::extract_genres(movie),
        })
    }

    /// The root is normally `<movie>` itself; some tools wrap it once more.
    fn movie_node(root: &XmlValue) -> &XmlValue {
        root.get("movie")
            .and_then(|movie| movie.as_slice().first())
            .unwrap_or(root)
    }

    fn extract_actors(movie: &XmlValue) -> Vec<String> {
        let Some(actors) = movie.get("actor") else {
            return Vec::new();
        };

        actors
            .as_slice()
            .iter()
            .map(|actor| match actor.get("name") {
                Some(name) => extract_text(Some(name)),
                None => extract_text(Some(actor)),
            })
            .collect()
    }

    fn extract_genres(movie: &XmlValue) -> Vec<String> {
        movie
            .get("genre")
            .map(|genres| {
                genres
                    .as_slice()
                    .iter()
                    .map(|genre| extract_text(Some(genre)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Reads and decodes an NFO file
pub async fn parse_metadata_file(path: impl AsRef<Path>) -> NfoResult<MovieRecord> {
    NfoParser::parse_file(path).await
}

fn optional_text(value: Option<&XmlValue>) -> Option<String> {
    let text = extract_text(value);
    (!text.is_empty()).then_some(text)
}

/// Parses the leading integer of a runtime value ("120", "120 min").
///
/// Anything without leading digits, negative, or out of range is no value.
fn parse_runtime(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
