mod cli;
mod commands_cmd;
mod info_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Info {
            ref file,
            ref format,
        } => info_cmd::run(file, format),
        cli::Commands::Commands {
            ref file,
            ref format,
        } => commands_cmd::run(file, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
