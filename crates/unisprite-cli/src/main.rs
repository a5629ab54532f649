mod commands;
mod logging;
mod present;
mod progress;

use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ReplaceArgs};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::error;
use unisprite_core::{AppConfig, ReplaceEngine, RunScope, SpriteRef, SpriteSelection};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let mut config = match unisprite_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };
    if let Some(project) = args.project {
        config.project_root = project;
    }

    let outcome = match args.command {
        Some(Commands::Replace(replace)) => run_replace(config, replace),
        Some(Commands::Resolve { sprites }) => run_resolve(config, &sprites),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run_replace(config: AppConfig, args: ReplaceArgs) -> anyhow::Result<()> {
    let engine = ReplaceEngine::new(config);
    let selection = SpriteSelection::new(args.before, args.after);
    let scope = if args.scene_only {
        RunScope::CurrentScene(args.scene)
    } else {
        RunScope::All
    };

    let reporter = CliReporter::new();
    let result = engine
        .run(&selection, &scope, &reporter)
        .context("replacement aborted")?;

    if args.json {
        println!("{}", present::render_json(&result)?);
    } else {
        print!("{}", present::render(&result));
    }

    Ok(())
}

fn run_resolve(config: AppConfig, sprites: &[SpriteRef]) -> anyhow::Result<()> {
    let engine = ReplaceEngine::new(config);
    for sprite in sprites {
        let id = engine
            .resolve(sprite)
            .with_context(|| format!("resolving {}", sprite))?;
        println!("{}  {}", sprite.to_string().bold(), id.to_string().cyan());
    }
    Ok(())
}
