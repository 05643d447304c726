// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use reelshelf_config::ConfigManager;
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("reelshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ReelShelf Team")
        .about("Read, write and repair NFO metadata files for movie libraries")
        .arg(
            Arg::new("config-dir")
                .short('c')
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml (defaults to the platform config dir)")
                .global(true),
        )
        .subcommand(
            Command::new("detect")
                .about("Print the detected text encoding of a file")
                .arg(Arg::new("file").required(true).value_name("FILE").help("Path to the NFO file")),
        )
        .subcommand(
            Command::new("show")
                .about("Decode an NFO file and print its metadata")
                .arg(Arg::new("file").required(true).value_name("FILE").help("Path to the NFO file"))
                .arg(Arg::new("json").short('j').long("json").help("Print the record as JSON").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("write")
                .about("Write a new NFO file")
                .arg(Arg::new("file").required(true).value_name("FILE").help("Destination path"))
                .arg(Arg::new("title").short('t').long("title").required(true).value_name("TITLE").help("Movie title"))
                .arg(Arg::new("code").long("code").required(true).value_name("CODE").help("Catalog code written as uniqueid"))
                .arg(
                    Arg::new("runtime")
                        .short('r')
                        .long("runtime")
                        .value_name("MINUTES")
                        .help("Runtime in minutes")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(Arg::new("premiered").long("premiered").value_name("DATE").help("Release date, e.g. 1995-12-15"))
                .arg(Arg::new("director").short('d').long("director").value_name("NAME").help("Director"))
                .arg(Arg::new("studio").short('s').long("studio").value_name("NAME").help("Studio"))
                .arg(Arg::new("actor").short('a').long("actor").value_name("NAME").help("Actor (repeatable)").action(ArgAction::Append))
                .arg(Arg::new("genre").short('g').long("genre").value_name("GENRE").help("Genre (repeatable)").action(ArgAction::Append)),
        )
        .subcommand(
            Command::new("normalize")
                .about("Re-encode an NFO file as UTF-8 keeping only the tracked fields")
                .arg(Arg::new("input").required(true).value_name("INPUT").help("File to read"))
                .arg(Arg::new("output").short('o').long("output").value_name("FILE").help("Output path (defaults to rewriting INPUT)")),
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
                .arg(Arg::new("init").long("init").help("Create config.toml with defaults if missing").action(ArgAction::SetTrue)),
        )
}

fn config_manager(config_dir: Option<&String>) -> Result<ConfigManager> {
    let manager = match config_dir {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    };
    manager.context("Failed to locate configuration directory")
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let manager = config_manager(matches.get_one::<String>("config-dir"))?;
    let config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.to_string()),
    )
    .init();
    log::debug!("Using config from {}", manager.config_path().display());

    match matches.subcommand() {
        Some(("detect", sub_matches)) => commands::detect(sub_matches).await,
        Some(("show", sub_matches)) => commands::show(sub_matches).await,
        Some(("write", sub_matches)) => commands::write(&config, sub_matches).await,
        Some(("normalize", sub_matches)) => commands::normalize(&config, sub_matches).await,
        Some(("config", sub_matches)) => commands::show_config(&manager, &config, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
