use lazydocs::{
    cli::{Args, Command},
    output::{ConsoleReporter, FanoutReporter, LogFileReporter},
};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();
    let command = Command::from_args(args);

    init_tracing(command.verbose());

    let exit_code = run_command(&command);
    process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise debug with --verbose and warn without
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Run the command with console and log-file diagnostics
fn run_command(command: &Command) -> i32 {
    let mut reporter =
        FanoutReporter::new().with(ConsoleReporter::new(command.use_colors(), command.quiet()));
    if let Some(log_file) = LogFileReporter::default_location() {
        tracing::debug!(path = %log_file.path().display(), "logging diagnostics");
        reporter = reporter.with(log_file);
    }

    let exit_code = command.run(&reporter);
    if exit_code > 0 && !command.quiet() {
        eprintln!("\nExiting with code {}", exit_code);
    }
    exit_code
}
