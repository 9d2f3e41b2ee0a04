//! Console transcript: a line-oriented view of a running search.
//!
//! [`ConsoleObserver`] writes the queue listing before every pop, one
//! block per expansion and a closing verdict:
//!
//! ```text
//! **********
//! Contents of Queue
//! index: 0 State: {(3M3C), (0M0C), left}
//! Expanding State: {(3M3C), (0M0C), left}
//!     -> Operation: (1 M, 1 C) to right
//!          index: 0, State: {(2M2C), (1M1C), right}
//! ```
//!
//! Illegal candidates are silent. The transcript is observational: it is
//! derived from observer callbacks and never feeds back into the search.

use std::io::{self, Write};

use crossing_kernel::model::configuration::Configuration;
use crossing_search::contract::{ExpansionView, SearchObserverV1};
use crossing_search::frontier::Frontier;
use crossing_search::graph::{CandidateOutcomeV1, TerminationReasonV1};
use crossing_search::search::SolutionPath;

pub const NO_SOLUTION: &str = "No solutions exist!";

/// Observer that renders the transcript to `W`.
///
/// Observer hooks cannot fail, so the first write error is parked and
/// later writes are skipped. [`ConsoleObserver::finish`] surfaces it.
#[derive(Debug)]
pub struct ConsoleObserver<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Hand back the writer, or the first write error.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while rendering.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, render: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = render(&mut self.out) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> SearchObserverV1 for ConsoleObserver<W> {
    fn on_iteration_start(&mut self, frontier: &Frontier) {
        self.emit(|out| write_queue(out, frontier));
    }

    fn on_expansion(&mut self, view: &ExpansionView<'_>) {
        self.emit(|out| write_expansion(out, view));
    }

    fn on_termination(&mut self, reason: &TerminationReasonV1, goal: Option<&Configuration>) {
        self.emit(|out| write_verdict(out, reason, goal));
    }
}

fn write_queue(out: &mut impl Write, frontier: &Frontier) -> io::Result<()> {
    writeln!(out, "**********")?;
    writeln!(out, "Contents of Queue")?;
    for (index, node) in frontier.iter().enumerate() {
        writeln!(out, "index: {index} State: {}", node.configuration)?;
    }
    Ok(())
}

fn write_expansion(out: &mut impl Write, view: &ExpansionView<'_>) -> io::Result<()> {
    writeln!(out, "Expanding State: {}", view.node.configuration)?;
    for record in view.candidates {
        match record.outcome {
            CandidateOutcomeV1::IllegalSkipped { .. } => {}
            CandidateOutcomeV1::Inserted { position, .. } => {
                writeln!(
                    out,
                    "\t-> Operation: {} to {}",
                    record.operator, record.candidate.boat
                )?;
                writeln!(out, "\t     index: {position}, State: {}", record.candidate)?;
            }
            CandidateOutcomeV1::DuplicateSkipped { .. } => {
                writeln!(
                    out,
                    "\t-> Operation: {} to {}",
                    record.operator, record.candidate.boat
                )?;
                writeln!(out, "\t     (!)repeated State: {}", record.candidate)?;
            }
        }
    }
    if view.dead_end {
        writeln!(out, "\tdead-end")?;
    }
    Ok(())
}

fn write_verdict(
    out: &mut impl Write,
    reason: &TerminationReasonV1,
    goal: Option<&Configuration>,
) -> io::Result<()> {
    match (reason, goal) {
        (TerminationReasonV1::GoalReached { .. }, Some(goal)) => {
            writeln!(out, "Goal Found! - State: {goal}")
        }
        (TerminationReasonV1::ExpansionBudgetExceeded, _) => {
            writeln!(out, "Search stopped: expansion budget exhausted")
        }
        (TerminationReasonV1::FrontierInvariantViolation, _) => {
            writeln!(out, "Search stopped: frontier rejected an insertion")
        }
        _ => writeln!(out, "{NO_SOLUTION}"),
    }
}

/// Numbered move list for a solution.
#[must_use]
pub fn render_solution(path: &SolutionPath) -> String {
    let mut text = format!("Solution ({} moves):\n", path.moves());
    text.push_str(&format!("  0. {}\n", path.start));
    for (i, step) in path.steps.iter().enumerate() {
        text.push_str(&format!(
            "  {}. {} {} -> {}: {}\n",
            i + 1,
            step.operator,
            step.departed_from,
            step.departed_from.opposite(),
            step.configuration
        ));
    }
    text
}

/// Forwards every event to two observers, `first` then `second`.
#[derive(Debug)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: SearchObserverV1, B: SearchObserverV1> SearchObserverV1 for Tee<A, B> {
    fn on_iteration_start(&mut self, frontier: &Frontier) {
        self.first.on_iteration_start(frontier);
        self.second.on_iteration_start(frontier);
    }

    fn on_expansion(&mut self, view: &ExpansionView<'_>) {
        self.first.on_expansion(view);
        self.second.on_expansion(view);
    }

    fn between_iterations(&mut self) {
        self.first.between_iterations();
        self.second.between_iterations();
    }

    fn on_termination(&mut self, reason: &TerminationReasonV1, goal: Option<&Configuration>) {
        self.first.on_termination(reason, goal);
        self.second.on_termination(reason, goal);
    }
}
