//! Scene application
//!
//! Runs scenes headless, scaffolds new component kinds and bundles scene
//! trees into a single document.

mod bundle;
mod error;
mod generator;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scene_engine::config::{Config, WorldConfig};
use scene_engine::foundation::logging;

use crate::error::AppError;
use crate::runner::Runner;

/// Scene engine command line
#[derive(Parser)]
#[command(version, about = "Run, scaffold and bundle scene_engine scenes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a scene, run it for a number of frames and print the entities
    Run {
        /// World configuration file (.toml or .ron)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Read scenes from a bundle instead of the scene root
        #[arg(long, value_name = "FILE")]
        bundle: Option<PathBuf>,

        /// Collection to load from (defaults to the configured one)
        #[arg(long)]
        collection: Option<String>,

        /// Scene to load (defaults to the configured one)
        #[arg(long)]
        scene: Option<String>,

        /// Number of fixed-step frames to run
        #[arg(long, default_value_t = 60)]
        frames: u64,

        /// Press the pause key on these frame indices
        #[arg(long, value_name = "FRAME", value_delimiter = ',')]
        pause_at: Vec<u64>,
    },

    /// Generate a component and system stub for a new kind
    New {
        /// Kind name in PascalCase
        name: String,

        /// Directory to write the stub into
        #[arg(long, default_value = "src/components")]
        out: PathBuf,
    },

    /// Validate every scene under a root and write them as one bundle
    Bundle {
        /// Scene root holding <collection>/<scene>.json files
        #[arg(long, default_value = "scenes")]
        root: PathBuf,

        /// Output file
        #[arg(long, default_value = "scenes.bundle.json")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = execute(cli.command) {
        log::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn execute(command: Command) -> Result<(), AppError> {
    match command {
        Command::Run {
            config,
            bundle,
            collection,
            scene,
            frames,
            pause_at,
        } => {
            let config = match config {
                Some(path) => WorldConfig::load_from_file(&path.to_string_lossy())?,
                None => WorldConfig::default(),
            };
            config.validate()?;
            logging::init_with_level(&config.log_level);

            let collection = collection.unwrap_or_else(|| config.default_collection.clone());
            let scene = scene.unwrap_or_else(|| config.default_scene.clone());

            let mut runner = Runner::from_config(&config, bundle.as_deref())?;
            runner.load(&scene, &collection)?;
            log::info!("Running {} entities", runner.world().entity_count());
            runner.run(frames, &pause_at)?;
            println!("{}", serde_json::to_string_pretty(&runner.report())?);
        }
        Command::New { name, out } => {
            logging::init_with_level("info");
            let path = generator::generate(&name, &out)?;
            println!("{}", path.display());
        }
        Command::Bundle { root, out } => {
            logging::init_with_level("info");
            let count = bundle::write_bundle(&root, &out)?;
            println!("Bundled {count} scenes into {}", out.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_options() {
        let cli = Cli::try_parse_from([
            "scene_app", "run", "--scene", "intro", "--frames", "10", "--pause-at", "2,5",
        ])
        .unwrap();

        match cli.command {
            Command::Run {
                scene,
                frames,
                pause_at,
                collection,
                ..
            } => {
                assert_eq!(scene.as_deref(), Some("intro"));
                assert_eq!(frames, 10);
                assert_eq!(pause_at, [2, 5]);
                assert!(collection.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["scene_app", "bundle"]).unwrap();
        match cli.command {
            Command::Bundle { root, out } => {
                assert_eq!(root, PathBuf::from("scenes"));
                assert_eq!(out, PathBuf::from("scenes.bundle.json"));
            }
            _ => panic!("expected bundle"),
        }
    }

    #[test]
    fn test_cli_requires_name_for_new() {
        assert!(Cli::try_parse_from(["scene_app", "new"]).is_err());
    }
}
