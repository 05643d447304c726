//! Example of decoding and re-encoding NFO documents

use reelshelf_nfo::{detect_encoding, MovieRecord, NfoParser, NfoWriter};

fn main() {
    println!("=== ReelShelf NFO Demo ===\n");

    println!("Example 1: Decoding a scraper NFO");
    println!("{}", "=".repeat(60));
    decode_example();

    println!("\n");

    println!("Example 2: Legacy encodings");
    println!("{}", "=".repeat(60));
    encoding_example();

    println!("\n");

    println!("Example 3: Writing a record");
    println!("{}", "=".repeat(60));
    encode_example();
}

fn decode_example() {
    let nfo = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<movie>
  <title>Heat</title>
  <runtime>170 min</runtime>
  <uniqueid type="num" default="true">HT-1995</uniqueid>
  <genre>Crime</genre>
  <director>Michael Mann</director>
  <actor>
    <name>Al Pacino</name>
    <role>Vincent Hanna</role>
  </actor>
  <actor>
    <name>Robert De Niro</name>
    <role>Neil McCauley</role>
  </actor>
</movie>"#;

    match NfoParser::parse_str(nfo) {
        Ok(record) => print_record(&record),
        Err(e) => eprintln!("Error parsing NFO: {}", e),
    }
}

fn encoding_example() {
    let content = "<movie><title>千と千尋の神隠し</title><studio>スタジオジブリ</studio></movie>";
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(content);

    println!("Detected encoding: {}", detect_encoding(&bytes));
    match NfoParser::parse_bytes(&bytes) {
        Ok(record) => print_record(&record),
        Err(e) => eprintln!("Error parsing NFO: {}", e),
    }
}

fn encode_example() {
    let record = MovieRecord::new("Heat", "HT-1995")
        .with_runtime(170)
        .with_actor("Al Pacino")
        .with_genre("Crime")
        .with_genre("Drama");

    match NfoWriter::new().to_xml_string(&record) {
        Ok(xml) => println!("{}", xml),
        Err(e) => eprintln!("Error writing NFO: {}", e),
    }
}

fn print_record(record: &MovieRecord) {
    println!("Title:    {}", record.title);
    println!("Code:     {}", record.code);
    if let Some(runtime) = record.runtime {
        println!("Runtime:  {} min", runtime);
    }
    if let Some(director) = &record.director {
        println!("Director: {}", director);
    }
    if let Some(studio) = &record.studio {
        println!("Studio:   {}", studio);
    }
    println!("Actors:   {}", record.actors.join(", "));
    println!("Genres:   {}", record.genres.join(", "));
}
