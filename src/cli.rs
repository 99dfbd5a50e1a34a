use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::data::loader::{NumericPolicy, RowPolicy};
use crate::data::model::{DatasetSummary, Split};
use crate::data::standardize::Standardizer;
use crate::selector::{ColumnSelector, Prompt, TargetSpec};
use crate::state::Session;

/// Load a comma-delimited table, encode one column as class labels and
/// draw a random train/test split.
#[derive(Parser, Debug)]
#[command(name = "tabsplit", version, about)]
pub struct Cli {
    /// Input file; the first line is the header
    pub file: PathBuf,

    /// Target column, by index or by (case-insensitive) name.
    /// Prompts interactively when neither this nor the config sets it.
    #[arg(short, long, value_name = "INDEX|NAME")]
    pub target: Option<String>,

    /// Fraction of rows that go to the training set [default: 0.8]
    #[arg(short = 'f', long)]
    pub train_fraction: Option<f64>,

    /// Seed for a reproducible split
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Fail on feature values that are not numbers instead of using 0.0
    #[arg(long)]
    pub strict: bool,

    /// Drop rows missing either a target value or features
    #[arg(long)]
    pub skip_incomplete: bool,

    /// Z-score the features using training-set statistics
    #[arg(long)]
    pub standardize: bool,

    /// JSON config file; command line flags take precedence
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of the text summary
    #[arg(long)]
    pub json: bool,

    /// Include the train/test rows in the JSON report
    #[arg(long, requires = "json")]
    pub emit_rows: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: DatasetSummary,
    train_size: usize,
    test_size: usize,
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standardizer: Option<Standardizer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    split: Option<&'a Split>,
}

impl Cli {
    /// Config file (if any) with command line overrides applied.
    pub fn settings(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(target) = &self.target {
            cfg.target = Some(TargetSpec::parse(target));
        }
        if let Some(fraction) = self.train_fraction {
            cfg.train_fraction = fraction;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.strict {
            cfg.numeric_policy = NumericPolicy::Strict;
        }
        if self.skip_incomplete {
            cfg.row_policy = RowPolicy::SkipIncomplete;
        }
        cfg.standardize |= self.standardize;
        Ok(cfg)
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.settings()?;

        let mut selector: Box<dyn ColumnSelector> = match cfg.target.clone() {
            Some(target) => target.into_selector(),
            None => Box::new(Prompt::stdio()),
        };

        let mut session = Session::new();
        let summary = session
            .load_file(&self.file, selector.as_mut(), &cfg.load_options())
            .with_context(|| format!("loading {}", self.file.display()))?
            .summary();

        let split = session
            .split(cfg.train_fraction, cfg.seed)
            .context("no dataset loaded")?;
        let standardizer = if cfg.standardize {
            split.standardize()
        } else {
            None
        };
        info!(
            "Split into {} train / {} test rows",
            split.train.len(),
            split.test.len()
        );

        let split: &Split = split;
        if self.json {
            let report = Report {
                summary,
                train_size: split.train.len(),
                test_size: split.test.len(),
                seed: cfg.seed,
                standardizer,
                split: self.emit_rows.then_some(split),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{summary}");
            println!(
                "Train: {} samples, Test: {} samples",
                split.train.len(),
                split.test.len()
            );
            if let Some(scaler) = &standardizer {
                println!("Standardized {} feature columns", scaler.means.len());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "tabsplit",
            "data.csv",
            "--target",
            "species",
            "-f",
            "0.6",
            "--seed",
            "9",
            "--strict",
            "--standardize",
        ]);
        let cfg = cli.settings().unwrap();
        assert_eq!(cfg.target, Some(TargetSpec::Name("species".into())));
        assert_eq!(cfg.train_fraction, 0.6);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.numeric_policy, NumericPolicy::Strict);
        assert_eq!(cfg.row_policy, RowPolicy::Independent);
        assert!(cfg.standardize);
    }

    #[test]
    fn no_flags_means_prompt_and_default_fraction() {
        let cli = Cli::parse_from(["tabsplit", "data.csv"]);
        let cfg = cli.settings().unwrap();
        assert_eq!(cfg.target, None);
        assert_eq!(cfg.train_fraction, 0.8);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn emit_rows_requires_json() {
        assert!(Cli::try_parse_from(["tabsplit", "d.csv", "--emit-rows"]).is_err());
        assert!(Cli::try_parse_from(["tabsplit", "d.csv", "--json", "--emit-rows"]).is_ok());
    }
}
