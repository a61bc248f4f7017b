//! Build a Neon source file and run the resulting program
//!
//! Usage: neon-run [--neon <PATH>] <SOURCE> [ARGS]...

use clap::{CommandFactory, Parser, error::ErrorKind};
use colored::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use doccheck_lib::build_run::BuildAndRun;
use doccheck_lib::config::BuildRunConfig;
use doccheck_lib::exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about = "Build a Neon source file, then run it", long_about = None)]
struct Cli {
    /// Toolchain executable used for the build step
    #[arg(long, value_name = "PATH")]
    neon: Option<PathBuf>,

    /// Source file to build, followed by the arguments passed to the built
    /// program. Wrapper options are only read before the source file.
    #[arg(
        value_name = "SOURCE [ARGS]",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<OsString>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let Some((source, args)) = cli.command.split_first() else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "a source file is required")
            .exit();
    };

    let mut config = BuildRunConfig::default();
    if let Some(neon) = cli.neon {
        config.neon = neon;
    }

    match BuildAndRun::new(config).build_and_run(Path::new(source), args) {
        Ok(()) => exit::success(),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::with_code(e.exit_code());
        }
    }
}
