//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Initialized on the first solve when the `console` feature is enabled.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// is honored; solver events default to `info`, so
/// `RUST_LOG=lpforge_solver=debug` adds one line per pivot.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "lpforge_solver=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("lpforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    method: Option<String>,
    stage: Option<String>,
    direction: Option<String>,
    status: Option<String>,
    entering: Option<String>,
    leaving: Option<String>,
    column: Option<String>,
    variables: Option<u64>,
    constraints: Option<u64>,
    rows: Option<u64>,
    columns: Option<u64>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    duration_ms: Option<u64>,
    methods: Option<u64>,
    applicable: Option<u64>,
    objective: Option<f64>,
    element: Option<f64>,
    agree: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.record_text(field, s);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "rows" => self.rows = Some(value),
            "columns" => self.columns = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "methods" => self.methods = Some(value),
            "applicable" => self.applicable = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "element" => self.element = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "agree" {
            self.agree = Some(value);
        }
    }
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "method" => self.method = Some(value),
            "stage" => self.stage = Some(value),
            "direction" => self.direction = Some(value),
            "status" => self.status = Some(value),
            "entering" => self.entering = Some(value),
            "leaving" => self.leaving = Some(value),
            "column" => self.column = Some(value),
            _ => {}
        }
    }
}

fn format_solver_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "pivot" => format_pivot(v),
        "bland_engaged" => format_bland(v),
        "phase_end" => format_phase_end(v),
        "solve_end" => format_solve_end(v, level),
        "compare_end" => format_compare_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} over {} variables and {} constraints",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", v.method.as_deref().unwrap_or("Solver")).bright_cyan(),
        v.direction.as_deref().unwrap_or("?").white().bold(),
        v.variables.unwrap_or(0).bright_yellow(),
        v.constraints.unwrap_or(0).bright_yellow()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let stage = v.stage.as_deref().unwrap_or("simplex");
    format!(
        "{} {} {} {} started: {} rows, {} columns",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", stage).bright_cyan(),
        stage.white().bold(),
        v.rows.unwrap_or(0).yellow(),
        v.columns.unwrap_or(0).yellow()
    )
}

fn format_pivot(v: &EventVisitor) -> String {
    format!(
        "    {} Iteration {:>4} | {} enters, {} leaves, pivot {:.4} | z = {}",
        "->".bright_blue(),
        v.iteration.unwrap_or(0).white(),
        v.entering.as_deref().unwrap_or("?").bright_green(),
        v.leaving.as_deref().unwrap_or("?").bright_red(),
        v.element.unwrap_or(0.0),
        format_objective(v.objective)
    )
}

fn format_bland(v: &EventVisitor) -> String {
    format!(
        "    {} Iteration {:>4} | degenerate basis, Bland's rule selects {}",
        "!!".yellow(),
        v.iteration.unwrap_or(0).white(),
        v.column.as_deref().unwrap_or("?").bright_yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let stage = v.stage.as_deref().unwrap_or("simplex");
    format!(
        "{} {} {} {} ended: {} after {} iterations, time spent ({}), z = {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", stage).bright_cyan(),
        stage.white().bold(),
        format_status(v.status.as_deref().unwrap_or("?")),
        v.iterations.unwrap_or(0).yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_objective(v.objective)
    )
}

fn format_solve_end(v: &EventVisitor, level: Level) -> String {
    let status = v.status.as_deref().unwrap_or("?");
    let tag = if level == Level::WARN {
        "WARN".bright_yellow().to_string()
    } else {
        "INFO".bright_green().to_string()
    };

    let mut output = format!(
        "{} {} {} Solving ended: {}",
        timestamp().bright_black(),
        tag,
        format!("[{}]", v.method.as_deref().unwrap_or("Solver")).bright_cyan(),
        format_status(status)
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Status:",
        status.to_uppercase(),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Iterations:",
        v.iterations.unwrap_or(0),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_compare_end(v: &EventVisitor) -> String {
    let agree = v.agree.unwrap_or(false);
    let verdict = if agree {
        "methods agree".bright_green().to_string()
    } else {
        "methods disagree".bright_red().to_string()
    };
    format!(
        "{} {} {} {} of {} methods applied, {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Compare]".bright_cyan(),
        v.applicable.unwrap_or(0).yellow(),
        v.methods.unwrap_or(0).yellow(),
        verdict
    )
}

fn format_status(status: &str) -> String {
    match status {
        "optimal" => status.bright_green().bold().to_string(),
        "iteration_limit" | "not_standard_form" => status.yellow().to_string(),
        _ => status.bright_red().to_string(),
    }
}

fn format_objective(objective: Option<f64>) -> String {
    match objective {
        Some(z) => format!("{z:.4}").bright_magenta().to_string(),
        None => "N/A".white().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(12), "12ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor::default();
        assert!(format_solver_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_status_text_survives_coloring() {
        assert!(format_status("optimal").contains("optimal"));
        assert!(format_status("unbounded").contains("unbounded"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
