//! Interactive pacing: pause between expansions until the user hits enter.

use std::io::{BufRead, Write};

use crossing_kernel::model::configuration::Configuration;
use crossing_search::contract::{ExpansionView, SearchObserverV1};
use crossing_search::frontier::Frontier;
use crossing_search::graph::TerminationReasonV1;

pub const PROMPT: &str = "\n<continue: >";

/// Wraps an observer and blocks on `input` after every expansion.
///
/// Once `input` hits end-of-file or fails, prompting stops and the search
/// runs on unpaced. Input content is ignored.
pub struct PromptPacer<O, R, W> {
    inner: O,
    input: R,
    output: W,
    live: bool,
    prompts: u64,
}

impl<O, R, W> PromptPacer<O, R, W>
where
    O: SearchObserverV1,
    R: BufRead,
    W: Write,
{
    pub fn new(inner: O, input: R, output: W) -> Self {
        Self {
            inner,
            input,
            output,
            live: true,
            prompts: 0,
        }
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> u64 {
        self.prompts
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    fn pause(&mut self) {
        if !self.live {
            return;
        }
        self.prompts += 1;
        if write!(self.output, "{PROMPT}")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            self.live = false;
            return;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                tracing::debug!("pacing input closed; continuing unpaced");
                self.live = false;
            }
            Ok(_) => {}
        }
    }
}

impl<O, R, W> SearchObserverV1 for PromptPacer<O, R, W>
where
    O: SearchObserverV1,
    R: BufRead,
    W: Write,
{
    fn on_iteration_start(&mut self, frontier: &Frontier) {
        self.inner.on_iteration_start(frontier);
    }

    fn on_expansion(&mut self, view: &ExpansionView<'_>) {
        self.inner.on_expansion(view);
    }

    fn between_iterations(&mut self) {
        self.inner.between_iterations();
        self.pause();
    }

    fn on_termination(&mut self, reason: &TerminationReasonV1, goal: Option<&Configuration>) {
        self.inner.on_termination(reason, goal);
    }
}
