//! Catalog Demo
//!
//! Solves every reference problem of the catalog with each method and
//! prints the outcome next to the known answer.
//!
//! Usage: `cargo run -p catalog [config.toml]`. Without a path the demo looks
//! for `lpforge.toml` in the working directory and falls back to defaults.

use lpforge::prelude::*;
use lpforge::{compare_methods, ConfigError};
use lpforge_test::catalog::{self, Expected};

fn main() {
    lpforge::console::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "lpforge.toml".to_string());
    let config = match SolverConfig::load(&path) {
        Ok(config) => config,
        Err(ConfigError::Io(_)) => SolverConfig::default(),
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };

    for entry in catalog::all() {
        println!("\n=== {} ({}) ===", entry.name, entry.description);
        println!("{}", entry.problem);
        println!("expected: {}", describe_expected(&entry.expected));

        let comparison = match compare_methods(&entry.problem, &config) {
            Ok(comparison) => comparison,
            Err(err) => {
                println!("rejected: {err}");
                continue;
            }
        };

        for result in comparison.results() {
            println!("{:>15}: {}", result.method.name(), describe(result));
        }
        if !comparison.agree(1e-6) {
            println!("methods disagree");
        }

        if let Ok(result) = lpforge::solve_with(&entry.problem, entry.method, &config) {
            println!("\n{} trace:", entry.method.name());
            for event in result.trace.iter() {
                println!("  {event}");
            }
        }
    }
}

fn describe(result: &SolveResult) -> String {
    match &result.outcome {
        Outcome::Optimal(solution) => {
            let mut text = format!(
                "optimal z = {:.4} at {:?} ({} iterations)",
                solution.objective_value,
                solution
                    .values
                    .iter()
                    .map(|v| (v * 1e6).round() / 1e6)
                    .collect::<Vec<_>>(),
                result.iterations
            );
            if solution.diagnostics.is_degenerate() {
                text.push_str(", degenerate");
            }
            if solution.diagnostics.has_alternative_optima() {
                text.push_str(", alternative optima");
            }
            text
        }
        Outcome::Unbounded { column } => format!("unbounded along {column}"),
        Outcome::Infeasible(infeasibility) => {
            format!("infeasible, residual {:.4}", infeasibility.residual)
        }
        Outcome::IterationLimit { stage, iterations } => {
            format!("iteration limit in {stage} after {iterations} pivots")
        }
        Outcome::NotStandardForm { row, violation } => {
            format!("not in standard form: row {} {violation}", row + 1)
        }
    }
}

fn describe_expected(expected: &Expected) -> String {
    match expected {
        Expected::Optimal { value, .. } => format!("optimal z = {value:.4}"),
        Expected::Unbounded => "unbounded".to_string(),
        Expected::Infeasible => "infeasible".to_string(),
    }
}
