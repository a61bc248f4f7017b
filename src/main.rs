use clap::Parser;
use colored::*;

use doccheck_lib::exit_codes::exit;
use doccheck_lib::{Outcome, Selector, ToolchainConfig, VerifyError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan for Markdown files, or a git reference followed by
    /// a colon (e.g. `origin/gh-pages:`) to read them from that tree
    #[arg(value_name = "SELECTOR")]
    selector: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let selector = Selector::parse(cli.selector.as_deref());

    match doccheck_lib::run(&selector, ToolchainConfig::default()) {
        Ok(Outcome::Verified(_)) | Ok(Outcome::SourceUnavailable { .. }) => exit::success(),
        Err(e @ VerifyError::SnippetFailed { .. }) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::snippet_failed();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
