use clap::Parser;
use ticksim::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
