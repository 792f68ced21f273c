use anyhow::Result;
use clap::Parser;
use stockroom::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    stockroom::logging::init(cli.verbose)?;
    cli.run()
}
