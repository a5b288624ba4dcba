//! Collects trace events for a solve at the configured level.

use lpforge_config::TraceLevel;
use lpforge_core::{Stage, Trace, TraceEvent};

use crate::tableau::Tableau;

/// Appends [`TraceEvent`]s to a [`Trace`], dropping what the level excludes.
#[derive(Debug)]
pub struct TraceRecorder {
    level: TraceLevel,
    trace: Trace,
}

impl TraceRecorder {
    pub fn new(level: TraceLevel) -> Self {
        Self {
            level,
            trace: Trace::new(),
        }
    }

    /// Records a step event unless tracing is off.
    pub fn record(&mut self, event: TraceEvent) {
        if self.level >= TraceLevel::Steps {
            self.trace.push(event);
        }
    }

    /// Records a tableau snapshot when the level asks for them.
    ///
    /// The snapshot is only rendered when it will be kept.
    pub fn snapshot(&mut self, stage: Stage, iteration: usize, tableau: &Tableau) {
        if self.level >= TraceLevel::Tableaux {
            self.trace.push(TraceEvent::Tableau {
                stage,
                iteration,
                snapshot: tableau.snapshot(),
            });
        }
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }
}
