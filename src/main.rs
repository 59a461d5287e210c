use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "erdx",
    about = "Make implicit ERD relationships explicit (n - 1 foreign keys, 1 - 1 parent ids)"
)]
struct Cli {
    /// Input file, one relation per line
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Output file for the rewritten relations
    #[arg(long, short = 'o', default_value = "output.txt")]
    output: PathBuf,

    /// Do not echo results to stdout
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Log filter directive, e.g. `info` or `erdx=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|e| {
        eprintln!("ERROR: invalid log level `{}`: {e}", cli.log_level);
        std::process::exit(1);
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let lines = erdx::batch::run(&cli.input, &cli.output).unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });

    if !cli.quiet {
        println!("Transformation completed. Results:");
        for line in &lines {
            println!("{line}");
        }
    }
}
