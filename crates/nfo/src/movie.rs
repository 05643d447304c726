// crates/nfo/src/movie.rs
//! Normalized movie record

use serde::{Deserialize, Serialize};

/// Value written for a missing director or studio
pub const DEFAULT_PLACEHOLDER: &str = "----";

/// Separator used for the human-readable `tag` field
pub const TAG_SEPARATOR: &str = " / ";

/// Normalized movie metadata exchanged between NFO files and the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    /// Movie title
    pub title: String,
    /// Catalog code, stored in the file's `uniqueid` element
    pub code: String,
    /// Running time in minutes
    pub runtime: Option<u32>,
    /// Release date, kept as written
    pub premiered: Option<String>,
    /// Director name
    pub director: Option<String>,
    /// Studio name
    pub studio: Option<String>,
    /// Actor names in file order
    pub actors: Vec<String>,
    /// Genre labels in file order
    pub genres: Vec<String>,
}

impl MovieRecord {
    /// Creates a record with a title and code and nothing else
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_runtime(mut self, minutes: u32) -> Self {
        self.runtime = Some(minutes);
        self
    }

    pub fn with_premiered(mut self, date: impl Into<String>) -> Self {
        self.premiered = Some(date.into());
        self
    }

    pub fn with_director(mut self, name: impl Into<String>) -> Self {
        self.director = Some(name.into());
        self
    }

    pub fn with_studio(mut self, name: impl Into<String>) -> Self {
        self.studio = Some(name.into());
        self
    }

    pub fn with_actor(mut self, name: impl Into<String>) -> Self {
        self.actors.push(name.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    /// Genres joined with `" / "`, or `None` when there are none
    pub fn tag_line(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(TAG_SEPARATOR))
        }
    }

    /// Director, unless empty or the legacy placeholder
    pub fn known_director(&self) -> Option<&str> {
        known(self.director.as_deref())
    }

    /// Studio, unless empty or the legacy placeholder
    pub fn known_studio(&self) -> Option<&str> {
        known(self.studio.as_deref())
    }
}

fn known(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != DEFAULT_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = MovieRecord::new("Heat", "HT-1995");
        assert_eq!(record.title, "Heat");
        assert_eq!(record.code, "HT-1995");
        assert!(record.runtime.is_none());
        assert!(record.actors.is_empty());
        assert!(record.genres.is_empty());
    }

    #[test]
    fn test_builder_preserves_order_and_duplicates() {
        let record = MovieRecord::new("Heat", "HT-1995")
            .with_actor("Al Pacino")
            .with_actor("Robert De Niro")
            .with_actor("Al Pacino");
        assert_eq!(record.actors, vec!["Al Pacino", "Robert De Niro", "Al Pacino"]);
    }

    #[test]
    fn test_tag_line() {
        let record = MovieRecord::new("Heat", "HT-1995")
            .with_genre("Crime")
            .with_genre("Drama");
        assert_eq!(record.tag_line(), Some("Crime / Drama".to_string()));
        assert_eq!(MovieRecord::default().tag_line(), None);
    }

    #[test]
    fn test_known_director_skips_placeholder() {
        let record = MovieRecord::new("Heat", "HT-1995").with_director("----");
        assert_eq!(record.known_director(), None);
        assert_eq!(record.director.as_deref(), Some("----"));

        let record = record.with_director("Michael Mann");
        assert_eq!(record.known_director(), Some("Michael Mann"));
    }

    #[test]
    fn test_known_studio_skips_empty() {
        let record = MovieRecord::new("Heat", "HT-1995").with_studio("");
        assert_eq!(record.known_studio(), None);
    }

    #[test]
    fn test_json_shape() {
        let record = MovieRecord::new("Heat", "HT-1995").with_runtime(170);
        let json = serde_json::to_value(&record).expect("Should serialize");
        assert_eq!(json["title"], "Heat");
        assert_eq!(json["runtime"], 170);
        assert!(json["director"].is_null());

        let back: MovieRecord = serde_json::from_value(json).expect("Should deserialize");
        assert_eq!(back, record);
    }
}
