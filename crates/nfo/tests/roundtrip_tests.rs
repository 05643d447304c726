// crates/nfo/tests/roundtrip_tests.rs
//! Encode-then-decode stability

use reelshelf_nfo::{parse_metadata_file, write_metadata_file, MovieRecord, NfoParser, NfoWriter};
use tempfile::TempDir;

fn sample_records() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("Heat", "HT-1995")
            .with_runtime(170)
            .with_premiered("1995-12-15")
            .with_director("Michael Mann")
            .with_studio("Warner Bros.")
            .with_actor("Al Pacino")
            .with_actor("Robert De Niro")
            .with_genre("Crime")
            .with_genre("Drama"),
        MovieRecord::new("无间道", "IA-2002")
            .with_actor("刘德华")
            .with_genre("犯罪"),
        MovieRecord::new("Tom & Jerry: \"The Movie\" <1992>", "TJ-1992")
            .with_director("Phil Roman")
            .with_actor("Richard Kind")
            .with_actor("Richard Kind")
            .with_genre("Animation"),
    ]
}

/// What the catalog gets back after a write and a read
fn expected_after_roundtrip(record: &MovieRecord) -> MovieRecord {
    let mut expected = record.clone();
    expected.director.get_or_insert_with(|| "----".to_string());
    expected.studio.get_or_insert_with(|| "----".to_string());
    expected
}

#[test]
fn test_in_memory_roundtrip() {
    let writer = NfoWriter::new();
    for record in sample_records() {
        let bytes = writer.to_bytes(&record).expect("Should serialize");
        let decoded = NfoParser::parse_bytes(&bytes).expect("Should parse");
        assert_eq!(decoded, expected_after_roundtrip(&record));
    }
}

#[tokio::test]
async fn test_file_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    for (i, record) in sample_records().into_iter().enumerate() {
        let path = temp_dir.path().join(format!("{}.nfo", i));
        write_metadata_file(&path, &record).await?;
        let decoded = parse_metadata_file(&path).await?;
        assert_eq!(decoded, expected_after_roundtrip(&record));
    }
    Ok(())
}

#[test]
fn test_placeholder_survives_second_roundtrip() {
    let writer = NfoWriter::new();
    let record = MovieRecord::new("Heat", "HT-1995").with_actor("Al Pacino").with_genre("Crime");

    let first = NfoParser::parse_bytes(&writer.to_bytes(&record).expect("Should serialize"))
        .expect("Should parse");
    let second = NfoParser::parse_bytes(&writer.to_bytes(&first).expect("Should serialize"))
        .expect("Should parse");

    assert_eq!(first.director.as_deref(), Some("----"));
    assert_eq!(second, first);
}

#[test]
fn test_genre_and_tag_agree() {
    let record = MovieRecord::new("Heat", "HT-1995")
        .with_genre("Drama")
        .with_genre("Comedy");
    let xml = NfoWriter::new().to_xml_string(&record).expect("Should serialize");

    assert_eq!(xml.matches("<genre>").count(), 2);
    assert!(xml.contains("<tag>Drama / Comedy</tag>"));

    let decoded = NfoParser::parse_str(&xml).expect("Should parse");
    assert_eq!(decoded.genres, vec!["Drama", "Comedy"]);
}

#[test]
fn test_surrounding_whitespace_survives() {
    let record = MovieRecord::new("Heat ", " HT-1995")
        .with_director(" Michael Mann")
        .with_studio("Warner Bros. ")
        .with_actor("Al Pacino ")
        .with_genre(" Crime");

    let bytes = NfoWriter::new().to_bytes(&record).expect("Should serialize");
    let decoded = NfoParser::parse_bytes(&bytes).expect("Should parse");

    assert_eq!(decoded.title, "Heat ");
    assert_eq!(decoded.code, " HT-1995");
    assert_eq!(decoded, record);
}

#[tokio::test]
async fn test_concurrent_calls_on_different_paths() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let mut handles = Vec::new();
    for i in 0..16u32 {
        let path = temp_dir.path().join(format!("movie-{}.nfo", i));
        handles.push(tokio::spawn(async move {
            let record = MovieRecord::new(format!("Movie {}", i), format!("M-{:03}", i))
                .with_runtime(90 + i)
                .with_actor(format!("Actor {}", i))
                .with_genre("Drama");
            write_metadata_file(&path, &record).await?;
            let decoded = parse_metadata_file(&path).await?;
            Ok::<_, reelshelf_nfo::NfoError>((record, decoded))
        }));
    }

    for handle in handles {
        let (record, decoded) = handle.await??;
        assert_eq!(decoded, expected_after_roundtrip(&record));
    }
    Ok(())
}
