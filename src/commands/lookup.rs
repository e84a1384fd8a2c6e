//! `lookup` command

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::reference::OperatorTable;

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Table produced by `generate`
    #[arg(short, long, default_value = "mnc.txt")]
    pub table: PathBuf,

    /// Field delimiter of the table
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    /// Mobile Country Code
    pub mcc: Option<u16>,

    /// Mobile Network Code
    pub mnc: Option<u16>,
}

pub fn run(args: LookupArgs) -> Result<()> {
    let table = OperatorTable::load(&args.table, args.delimiter)?;
    println!("{}", table.resolve(args.mcc, args.mnc));
    Ok(())
}
