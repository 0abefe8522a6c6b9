// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Output formatters for CLI results.

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use fluxion_backtest::Evaluation;
use fluxion_policies::PolicyInfo;
use fluxion_types::{PolicyParameters, TrialTrace};
use std::fmt::Write;

/// Formatter for pretty tables
#[derive(Debug)]
pub struct TableFormatter;

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn profit_cell(value: f64) -> Cell {
    let cell = Cell::new(format!("{value:.2}"));
    if value > 0.0 {
        cell.fg(Color::Green)
    } else if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// `key=value, ...` rendering, `-` when empty
pub fn format_parameters(parameters: &PolicyParameters) -> String {
    if parameters.is_empty() {
        return "-".to_owned();
    }
    parameters
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableFormatter {
    /// Summary of an evaluation run
    pub fn format_evaluation(evaluation: &Evaluation) -> String {
        let stats = &evaluation.stats;
        let mut output = String::new();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Policy",
            "Parameters",
            "Trials",
            "Steps",
            "Mean Profit\n(per step)",
            "Std Dev",
            "Best Trial\n(total)",
            "Worst Trial\n(total)",
        ]));

        let totals = evaluation.trials.iter().map(|t| t.trace.final_profit());
        let best = totals.clone().fold(f64::NEG_INFINITY, f64::max);
        let worst = totals.fold(f64::INFINITY, f64::min);

        table.add_row(vec![
            Cell::new(&stats.class_name).add_attribute(Attribute::Bold),
            Cell::new(format_parameters(&stats.parameters)),
            Cell::new(stats.num_runs),
            Cell::new(stats.pooled_steps),
            profit_cell(stats.mean_profit),
            Cell::new(format!("{:.2}", stats.std_profit)),
            profit_cell(best),
            profit_cell(worst),
        ]);

        output.push_str(&table.to_string());
        output.push('\n');
        let _ = writeln!(
            output,
            "Average profit ($): {:.2} ± {:.2}",
            stats.mean_profit, stats.std_profit
        );
        let _ = writeln!(output, "Seed: {}", stats.seed);
        output
    }

    /// Totals of a single full-series run
    pub fn format_run(class_name: &str, trace: &TrialTrace) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Policy",
            "Steps",
            "Total Profit",
            "Final SoC\n(kWh)",
            "Charging\nSteps",
            "Discharging\nSteps",
        ]));

        let charging = trace.actions.iter().filter(|a| **a > 0.0).count();
        let discharging = trace.actions.iter().filter(|a| **a < 0.0).count();
        table.add_row(vec![
            Cell::new(class_name).add_attribute(Attribute::Bold),
            Cell::new(trace.len()),
            profit_cell(trace.final_profit()),
            Cell::new(
                trace
                    .socs
                    .last()
                    .map_or_else(|| "-".to_owned(), |soc| format!("{soc:.2}")),
            ),
            Cell::new(charging),
            Cell::new(discharging),
        ]);

        format!("{table}\n")
    }

    /// Registered policies
    pub fn format_policies(policies: &[PolicyInfo]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["Policy", "Parameters", "Description"]));
        for info in policies {
            table.add_row(vec![
                Cell::new(&info.name).fg(Color::Green),
                Cell::new(&info.parameters),
                Cell::new(&info.description),
            ]);
        }
        format!("{table}\n")
    }
}
