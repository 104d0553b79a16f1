use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;

use glox::lox;

/// Tree-walking interpreter for the Lox scripting language.
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Script to execute; starts an interactive prompt when omitted.
    script: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Cli = Cli::parse();

    match args.script.as_slice() {
        [] => lox::run_prompt()?,

        [script] => {
            if let Err(errors) = lox::run_file(script) {
                for e in &errors {
                    eprintln!("{}", e);
                }

                process::exit(65);
            }
        }

        _ => {
            eprintln!("Usage: glox [script]");

            process::exit(64);
        }
    }

    Ok(())
}
