// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! CLI entry point for the FluxION policy evaluator

use anyhow::{Context, Result};
use clap::Parser;
use fluxion_backtest::{
    BatteryEnv, EvaluationHarness, EvaluationSettings, MarketSeries, ResultsWriter, run_trial,
    write_trace_file,
};
use fluxion_evaluator::{
    SyntheticMarketConfig,
    cli::{Cli, Commands, EvalConfig, EvaluateArgs, GenerateArgs, RunArgs, TableFormatter},
    cli::formatters::format_parameters,
    parse_datetime,
};
use fluxion_policies::PolicyRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let registry = PolicyRegistry::new_with_defaults();

    match cli.command {
        Commands::Evaluate(args) => evaluate_command(&args, &registry),
        Commands::Run(args) => run_command(&args, &registry),
        Commands::Policies => {
            print!("{}", TableFormatter::format_policies(registry.list_policies()));
            Ok(())
        }
        Commands::Generate(args) => generate_command(&args),
    }
}

fn load_series(path: &Path) -> Result<Arc<MarketSeries>> {
    let series = MarketSeries::from_csv_path(path)
        .with_context(|| format!("Failed to load market data from {}", path.display()))?;
    Ok(Arc::new(series))
}

fn evaluate_command(args: &EvaluateArgs, registry: &PolicyRegistry) -> Result<()> {
    let config = EvalConfig::from_file_or_default(&args.config)?;
    let policy = config.resolve_policy(
        args.policy.class_name.as_deref(),
        &args.policy.params,
        &args.config,
    )?;
    let constructor = registry.get(&policy.class_name)?;

    let series = load_series(&args.data)?;
    let harness = EvaluationHarness::new(
        series,
        config.battery,
        EvaluationSettings {
            trials: args.trials,
            seed: args.seed,
            threads: args.threads,
        },
    )?;

    let writer = match &args.output_dir {
        Some(dir) => ResultsWriter::new(dir),
        None => ResultsWriter::in_timestamped_dir(
            Path::new(&config.output.results_dir),
            &policy.class_name,
        ),
    };

    println!(
        "Running {} trials with policy {} and parameters {}",
        args.trials,
        policy.class_name,
        format_parameters(&policy.parameters)
    );
    let evaluation = harness
        .evaluate_and_persist(&policy, constructor, &writer)
        .with_context(|| format!("Evaluation of {} failed", policy.class_name))?;

    println!("\n{}", TableFormatter::format_evaluation(&evaluation));
    println!("Results saved to: {}", writer.root().display());
    Ok(())
}

fn run_command(args: &RunArgs, registry: &PolicyRegistry) -> Result<()> {
    let output_mode = args.output.to_lowercase();
    let wants_csv = output_mode == "csv" || output_mode == "both";
    if wants_csv && args.csv_path.is_none() {
        anyhow::bail!("--csv-path is required when --output is 'csv' or 'both'");
    }

    let config = EvalConfig::from_file_or_default(&args.config)?;
    let policy_config = config.resolve_policy(
        args.policy.class_name.as_deref(),
        &args.policy.params,
        &args.config,
    )?;
    let mut policy = registry.build(&policy_config, args.seed)?;

    let series = load_series(&args.data)?;
    let mut env = BatteryEnv::new(series, config.battery)?;
    info!(policy = %policy_config.class_name, "Running full-series episode");
    let trace = run_trial(&mut env, policy.as_mut(), 0, None)?;

    if output_mode == "table" || output_mode == "both" {
        print!("{}", TableFormatter::format_run(&policy_config.class_name, &trace));
    }
    // An explicit --csv-path always gets the trace, whatever --output says
    if let Some(csv_path) = &args.csv_path {
        write_trace_file(csv_path, &trace)
            .with_context(|| format!("Failed to write CSV to {}", csv_path.display()))?;
        println!("CSV exported to: {}", csv_path.display());
    }
    Ok(())
}

fn generate_command(args: &GenerateArgs) -> Result<()> {
    let config = SyntheticMarketConfig {
        start: parse_datetime(&args.start)?,
        end: parse_datetime(&args.end)?,
        seed: args.seed,
    };
    let rows = config.write_file(&args.output)?;
    println!("Wrote {rows} rows to {}", args.output.display());
    Ok(())
}
