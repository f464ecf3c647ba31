use anyhow::Result;
use clap::Parser;
use line_parser::cli::{execute_parse, Cli, ParseOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = ParseOptions::from(cli);

    if let Err(error) = execute_parse(&options) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }

    Ok(())
}
