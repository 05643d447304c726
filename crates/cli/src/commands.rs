// FILE: crates/cli/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use console::style;
use reelshelf_config::{Config, ConfigManager, ConfigSection, NfoConfig};
use reelshelf_nfo::{
    detect_encoding, parse_metadata_file, MovieRecord, NfoParser, NfoWriter, WriterOptions,
};
use std::path::PathBuf;

/// Print the detected encoding of a file
pub async fn detect(matches: &ArgMatches) -> Result<()> {
    let path = required_path(matches, "file")?;

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("{}", detect_encoding(&bytes));
    Ok(())
}

/// Decode a file and print the record
pub async fn show(matches: &ArgMatches) -> Result<()> {
    let path = required_path(matches, "file")?;

    let record = parse_metadata_file(&path)
        .await
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize to JSON")?;
        println!("{}", json);
    } else {
        print_record(&record);
    }

    Ok(())
}

/// Build a record from command-line fields and write it
pub async fn write(config: &Config, matches: &ArgMatches) -> Result<()> {
    let path = required_path(matches, "file")?;
    let record = record_from_matches(matches)?;

    writer_for(&config.nfo)?
        .write_file(&path, &record)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", style("✓").green().bold(), path.display());
    Ok(())
}

/// Decode a file in any detectable encoding and write it back as UTF-8
pub async fn normalize(config: &Config, matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| input.clone());

    let bytes = tokio::fs::read(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let encoding = detect_encoding(&bytes);

    let record = NfoParser::parse_bytes(&bytes)
        .map_err(|err| err.with_path(&input))
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    writer_for(&config.nfo)?
        .write_file(&output, &record)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({}) -> {} (UTF-8)",
        style("✓").green().bold(),
        input.display(),
        encoding,
        output.display()
    );
    Ok(())
}

/// Print the config file location and effective values
pub fn show_config(manager: &ConfigManager, config: &Config, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("init") {
        let created = manager
            .initialize()
            .context("Failed to create default config")?;
        if created {
            println!("{} Created {}", style("✓").green().bold(), manager.config_path().display());
        }
    }

    println!("\n{}", style("Configuration").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("File: {}", manager.config_path().display());
    if !manager.config_path().exists() {
        println!("      {}", style("(not created, using defaults)").dim());
    }
    println!();

    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;
    print!("{}", toml_string);

    Ok(())
}

/// Writer settings taken from the `[nfo]` config section
///
/// Settings that fail validation are refused instead of reaching the writer.
pub fn writer_for(nfo: &NfoConfig) -> Result<NfoWriter> {
    if let Err(errors) = nfo.validate() {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        bail!("Invalid [{}] settings: {}", nfo.section_name(), message);
    }

    Ok(NfoWriter::with_options(WriterOptions {
        placeholder: nfo.placeholder.clone(),
        indent: nfo.indent,
        write_bom: nfo.write_bom,
        schema_namespaces: nfo.schema_namespaces,
    }))
}

/// Collect the `write` subcommand's fields into a record
pub fn record_from_matches(matches: &ArgMatches) -> Result<MovieRecord> {
    let title = matches
        .get_one::<String>("title")
        .ok_or_else(|| anyhow!("Title is required"))?;
    let code = matches
        .get_one::<String>("code")
        .ok_or_else(|| anyhow!("Code is required"))?;

    let mut record = MovieRecord::new(title.as_str(), code.as_str());
    record.runtime = matches.get_one::<u32>("runtime").copied();
    record.premiered = matches.get_one::<String>("premiered").cloned();
    record.director = matches.get_one::<String>("director").cloned();
    record.studio = matches.get_one::<String>("studio").cloned();
    record.actors = many(matches, "actor");
    record.genres = many(matches, "genre");

    Ok(record)
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<String>(id)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("{} is required", id))
}

fn print_record(record: &MovieRecord) {
    println!("\n{}", style(display_or_dash(&record.title)).bold());
    println!("{}", "=".repeat(80));
    println!("Code: {}", display_or_dash(&record.code));
    if let Some(runtime) = record.runtime {
        println!("Runtime: {}", format_runtime(runtime));
    }
    if let Some(premiered) = &record.premiered {
        println!("Premiered: {}", premiered);
    }
    println!("Director: {}", record.known_director().unwrap_or("-"));
    println!("Studio: {}", record.known_studio().unwrap_or("-"));

    if !record.genres.is_empty() {
        println!("Genres: {}", record.genres.join(", "));
    }
    if !record.actors.is_empty() {
        println!("\nCast:");
        for actor in &record.actors {
            println!("  {}", actor);
        }
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}
