use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod project;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a fresh distribution from a project file.
    Generate(cmd::generate::GenerateArgs),
    /// Re-validate a stored distribution snapshot.
    Check(cmd::check::CheckArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Generate(args) => cmd::generate::run(args),
        Commands::Check(args) => cmd::check::run(args),
    };
    process::exit(code);
}
