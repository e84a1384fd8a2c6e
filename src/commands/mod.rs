//! Command Handlers
//!
//! Each subcommand of the `mccmnc` binary lives in its own submodule.
//!
//! ## Module Organization
//! - `generate` - Build the MCC/MNC table from an E.212 .docx file
//! - `lookup` - Resolve an (MCC, MNC) pair against a generated table

pub mod generate;
pub mod lookup;

use clap::{Parser, Subcommand};

pub use generate::GenerateArgs;
pub use lookup::LookupArgs;

#[derive(Debug, Parser)]
#[command(name = "mccmnc", version, about = "ITU-T E.212 MCC/MNC table generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the MCC/MNC table from an E.212 .docx file
    Generate(GenerateArgs),
    /// Look up the operator for an MCC/MNC pair
    Lookup(LookupArgs),
}

impl Command {
    pub fn run(self) -> crate::error::Result<()> {
        match self {
            Command::Generate(args) => generate::run(args),
            Command::Lookup(args) => lookup::run(args),
        }
    }
}
