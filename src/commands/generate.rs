//! `generate` command
//!
//! Runs the full pipeline and optionally prints the run summary as JSON.

use std::path::PathBuf;

use clap::Args;

use crate::config::PipelineConfig;
use crate::error::{IoContext, Result};
use crate::itu::{self, RunSummary};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// E.212 list as a .docx file
    pub input: PathBuf,

    /// Destination table
    #[arg(short, long, default_value = "mnc.txt")]
    pub output: PathBuf,

    /// Directory for the extracted markup and the flattened text
    #[arg(long, env = "MCCMNC_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// JSON file overriding pipeline defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave the intermediate files in the working directory
    #[arg(long)]
    pub keep_intermediate: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Defaults, then the config file, then command-line flags
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = &self.work_dir {
            config.work_dir = dir.clone();
        }
        Ok(config)
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = args.pipeline_config()?;
    let summary = itu::generate_table(&args.input, &args.output, &config, args.keep_intermediate)?;

    if args.json {
        print_summary(&summary)?;
    } else {
        println!(
            "Wrote {} records to {}",
            summary.record_count,
            summary.output.display()
        );
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(std::io::Error::from)
        .context(|| "Failed to serialize run summary".to_string())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Command};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["mccmnc", "generate", "T-SP-E.212B-2016.docx"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.input, PathBuf::from("T-SP-E.212B-2016.docx"));
                assert_eq!(args.output, PathBuf::from("mnc.txt"));
                assert!(!args.keep_intermediate);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_work_dir_flag_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{ "work_dir": "/from/file", "delimiter": "," }"#).unwrap();

        let args = GenerateArgs {
            input: PathBuf::from("in.docx"),
            output: PathBuf::from("out.txt"),
            work_dir: Some(PathBuf::from("/from/flag")),
            config: Some(config_path),
            keep_intermediate: false,
            json: false,
        };
        let config = args.pipeline_config().unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/from/flag"));
        assert_eq!(config.delimiter, ',');
    }
}
