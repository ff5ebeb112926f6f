mod assets;
mod cli;
mod demo;
mod runner;

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliAction, CliError, ClientArgs};
use crate::demo::DemoHost;
use crate::runner::RunnerError;
use nq_common::{HostParms, Hunk};
use nq_sys::ConsoleInput;
use nq_window_glfw::WindowConfig;

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Cli(#[from] CliError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let action = cli::parse_args(raw_args.iter().cloned())?;
    let args = match action {
        CliAction::Help => {
            println!("{}", cli::usage());
            return Ok(());
        }
        CliAction::Run(args) => args,
    };

    if !args.nostdout {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let parms = host_parms(&args, raw_args);
    let mut hunk = Hunk::new(parms.memsize);
    let mut host = DemoHost::new();
    let console = ConsoleInput::spawn();

    if parms.dedicated {
        runner::run_dedicated(&parms, &mut hunk, &mut host, console)?;
    } else {
        let config = window_config(&args);
        runner::run_windowed(&parms, &mut hunk, &mut host, config, console)?;
    }

    Ok(())
}

fn host_parms(args: &ClientArgs, raw_args: Vec<String>) -> HostParms {
    HostParms {
        memsize: args.mem_mb * 1024 * 1024,
        basedir: PathBuf::from(&args.basedir),
        cachedir: PathBuf::from(&args.cachedir),
        args: raw_args,
        dedicated: args.dedicated,
    }
}

fn window_config(args: &ClientArgs) -> WindowConfig {
    let defaults = WindowConfig::default();
    WindowConfig {
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
        ..defaults
    }
}
