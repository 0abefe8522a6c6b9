// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fluxion-eval")]
#[command(author, version, about = "FluxION Policy Evaluator CLI")]
#[command(
    long_about = "Backtest battery trading policies against a historical market price series.\n\
    \nEach evaluation runs many seeded trials over random windows of the series and\n\
    reports the mean and standard deviation of the per-step profit.\n\
    \nExamples:\n  \
    fluxion-eval evaluate --class-name RollingAveragePolicy --param window_size=20\n  \
    fluxion-eval evaluate --config config.toml --trials 500 --threads 4\n  \
    fluxion-eval run --class-name ThresholdPolicy --csv-path trace.csv\n  \
    fluxion-eval generate --start 2024-01-01 --end 2024-01-31 --output train.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a policy over many randomized trials
    #[command(
        long_about = "Run seeded Monte-Carlo trials of one policy and save the results.\n\
        \nThe policy comes from --class-name/--param or, without --class-name, from the\n\
        [policy] table of the config file. Results are written to\n\
        results/<timestamp>_<class_name>/ unless --output-dir is given.\n\
        \nExamples:\n  \
        fluxion-eval evaluate --class-name RandomActionPolicy\n  \
        fluxion-eval evaluate --config config.toml --seed 7 --output-dir ./out"
    )]
    Evaluate(EvaluateArgs),

    /// Run one policy once over the whole series
    #[command(
        long_about = "Run a single episode from the first tick to the end of the series.\n\
        \nPrints the final profit and state of charge; optionally saves the trace.\n\
        \nExamples:\n  \
        fluxion-eval run --class-name RollingAveragePolicy\n  \
        fluxion-eval run --class-name ThresholdPolicy --param sell_above=40 --csv-path trace.csv"
    )]
    Run(RunArgs),

    /// List available policies
    Policies,

    /// Generate a synthetic market data file
    #[command(
        long_about = "Write a CSV of 5-minute ticks with random prices and weather features.\n\
        \nThe output can be used directly as --data input.\n\
        \nExamples:\n  \
        fluxion-eval generate\n  \
        fluxion-eval generate --start 2024-06-01 --end 2024-06-07 --seed 1 --output june.csv"
    )]
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Number of trials to run
    #[arg(long, default_value_t = 100, help = "Number of randomized trials")]
    pub trials: usize,

    /// Base seed for randomness
    #[arg(
        long,
        default_value_t = 42,
        help = "Base seed (trial i uses seed + i)"
    )]
    pub seed: u64,

    /// Path to the market data CSV
    #[arg(
        long,
        value_name = "PATH",
        default_value = "train.csv",
        help = "Market data CSV with a Market_Price column"
    )]
    pub data: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Path to TOML configuration file
    #[arg(
        long,
        value_name = "PATH",
        default_value = "config.toml",
        help = "Config file with [policy] and optional [battery] tables",
        long_help = "TOML file providing the policy when --class-name is not given,\n\
          and optional battery parameters. A missing file is only an error\n\
          when the policy has to come from it.\n\
          \nExample: --config config.toml"
    )]
    pub config: PathBuf,

    /// Output directory (overrides the timestamped default)
    #[arg(
        long,
        value_name = "PATH",
        help = "Directory for trial CSVs and config_stats.json"
    )]
    pub output_dir: Option<PathBuf>,

    /// Worker threads
    #[arg(
        long,
        default_value_t = 1,
        help = "Trials run in parallel on this many threads (1 = sequential)"
    )]
    pub threads: usize,
}

#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Path to the market data CSV
    #[arg(long, value_name = "PATH", default_value = "train.csv")]
    pub data: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Path to TOML configuration file
    #[arg(long, value_name = "PATH", default_value = "config.toml")]
    pub config: PathBuf,

    /// Seed for stochastic policies
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output format: table, csv, or both
    #[arg(long, default_value = "table",
          value_parser = ["table", "csv", "both"],
          help = "How to display results")]
    pub output: String,

    /// CSV file path (required when output is csv or both)
    #[arg(
        long,
        value_name = "PATH",
        help = "Where to save the step-by-step trace (written whenever given)"
    )]
    pub csv_path: Option<PathBuf>,
}

/// Policy selection shared by `evaluate` and `run`
#[derive(Debug, Clone, Parser)]
pub struct PolicyArgs {
    /// Policy class name
    #[arg(
        long,
        value_name = "NAME",
        help = "Policy to use (see `fluxion-eval policies`)",
        long_help = "Registered policy name. Without it the [policy] table of the\n\
          config file is used."
    )]
    pub class_name: Option<String>,

    /// Policy parameters as key=value pairs
    #[arg(
        long = "param",
        value_name = "KEY=VALUE",
        help = "Policy parameter (repeatable)",
        long_help = "Policy parameter as key=value. Values are read as JSON\n\
          (numbers, booleans, quoted strings, arrays) and fall back to a\n\
          plain string.\n\
          \nExample: --param window_size=20 --param label=fast"
    )]
    pub params: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD", default_value = "2024-01-01")]
    pub start: String,

    /// Last timestamp (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"), inclusive
    #[arg(long, value_name = "YYYY-MM-DD", default_value = "2024-01-02")]
    pub end: String,

    /// Seed for the generator
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV path
    #[arg(long, value_name = "PATH", default_value = "train.csv")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_defaults() {
        let cli = Cli::try_parse_from(["fluxion-eval", "evaluate"]).unwrap();
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };

        assert_eq!(args.trials, 100);
        assert_eq!(args.seed, 42);
        assert_eq!(args.data, PathBuf::from("train.csv"));
        assert_eq!(args.threads, 1);
        assert!(args.policy.class_name.is_none());
        assert!(args.policy.params.is_empty());
    }

    #[test]
    fn test_repeated_params() {
        let cli = Cli::try_parse_from([
            "fluxion-eval",
            "evaluate",
            "--class-name",
            "ThresholdPolicy",
            "--param",
            "sell_above=40",
            "--param",
            "buy_below=20",
            "--trials",
            "10",
        ])
        .unwrap();
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };

        assert_eq!(args.policy.class_name.as_deref(), Some("ThresholdPolicy"));
        assert_eq!(args.policy.params, vec!["sell_above=40", "buy_below=20"]);
        assert_eq!(args.trials, 10);
    }

    #[test]
    fn test_run_rejects_unknown_output() {
        assert!(Cli::try_parse_from(["fluxion-eval", "run", "--output", "xml"]).is_err());
    }
}
