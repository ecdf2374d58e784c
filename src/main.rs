use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgMatches, Command};

use snapshotify::config::SnapshotifyConfig;
use snapshotify::web::build_rocket;
use snapshotify::{FetchOutcome, PlaylistSnapshotter, SnapshotStore};

fn cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("snapshotify.config")
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("fetch")
                .about("Fetch the playlist and save today's snapshot")
                .arg(
                    Arg::new("playlist")
                        .short('p')
                        .long("playlist")
                        .help("Playlist id, overrides the configured one"),
                ),
        )
        .subcommand(Command::new("serve").about("Serve the snapshot history"))
}

fn fetch(config: &SnapshotifyConfig, matches: &ArgMatches) -> ExitCode {
    let store = SnapshotStore::new(&config.data_dir);
    let snapshotter = PlaylistSnapshotter::new(config, store);
    let playlist_id = matches.get_one::<String>("playlist").map(String::as_str);

    let outcome = snapshotter.run(playlist_id);
    match &outcome {
        FetchOutcome::Saved(saved) => {
            println!(
                "Successfully saved playlist data to {}",
                saved.path.display()
            );
            println!("Total tracks: {}", saved.total_tracks);
            println!("Timestamp: {}", saved.timestamp);
        }
        FetchOutcome::Failed { error } => eprintln!("Error: {}", error),
    }
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn serve(config: &SnapshotifyConfig) -> ExitCode {
    let store = SnapshotStore::new(&config.data_dir);
    if let Err(err) = std::fs::create_dir_all(store.dir()) {
        log::warn!(
            "Could not create data directory {}: {}",
            store.dir().display(),
            err
        );
    }
    let rocket = build_rocket(store, config.address, config.port);
    match rocket::execute(rocket.launch()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Server error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("snapshotify.config"));
    let config = match SnapshotifyConfig::from_file(&config_path) {
        Ok(config) => config.with_env(),
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match matches.subcommand() {
        Some(("fetch", sub_matches)) => fetch(&config, sub_matches),
        Some(("serve", _)) => serve(&config),
        _ => unreachable!("subcommand is required"),
    }
}
