mod cli;
mod config;
mod data;
mod selector;
mod state;

use clap::Parser;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    Cli::parse().run()
}
