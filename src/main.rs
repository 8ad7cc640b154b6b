// Entrypoint for the `cl` binary.
// - Keeps `main` small: parse arguments, set up logging, hand off to `App`.
// - Any error ends the process with exit code 1 after a red message.

use clap::Parser;
use clickup_cli::cli::Cli;
use clickup_cli::commands::App;
use clickup_cli::config::ConfigStore;
use clickup_cli::output::{Console, Output};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("clickup_cli")
        .add_filter_allow_str(module_path!())
        .build();
    // Only fails when a logger is already installed.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app = App::new(ConfigStore::locate());
    let mut out = Console;
    if let Err(e) = app.run(cli.command, &mut out) {
        log::debug!("command failed: {e:?}");
        out.error(&format!("Error: {e:#}"));
        std::process::exit(1);
    }
}
