//! # Pantry Shop Entry Point
//!
//! Parses arguments and hands off to [`pantry_shop::run`].

use clap::Parser;

fn main() -> anyhow::Result<()> {
    pantry_shop::run(pantry_shop::Cli::parse())
}
