// mccmnc Library
// ITU-T E.212 MCC/MNC table generation and operator lookup

pub mod commands;
pub mod config;
pub mod docx;
pub mod error;
pub mod itu;
pub mod reference;

pub use config::PipelineConfig;
pub use error::{MccMncError, Result};
pub use itu::{generate_table, Assignment, RunSummary};
pub use reference::{OperatorName, OperatorTable};
