use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::engine::controller::{RunController, RunTicket};
use crate::engine::step::{Stats, Step, StepAlgorithm};
use crate::Result;

/// Terminal outcome of a scheduled run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Sink for the two narrow output interfaces of a run.
///
/// `render` receives its own copy of the model after every step.
pub trait Observer<S> {
    fn render(&mut self, snapshot: S);

    fn on_stats(&mut self, _stats: &Stats) {}
}

impl<S, O> Observer<S> for &mut O
where
    O: Observer<S> + ?Sized,
{
    fn render(&mut self, snapshot: S) {
        (**self).render(snapshot)
    }

    fn on_stats(&mut self, stats: &Stats) {
        (**self).on_stats(stats)
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl<S> Observer<S> for NullObserver {
    fn render(&mut self, _snapshot: S) {}
}

/// Keeps every snapshot and stats report in order
#[derive(Debug, Clone)]
pub struct Recorder<S> {
    pub frames: Vec<S>,
    pub stats: Vec<Stats>,
}

impl<S> Recorder<S> {
    pub fn new() -> Self {
        Recorder {
            frames: Vec::new(),
            stats: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<&S> {
        self.frames.last()
    }

    pub fn last_stats(&self) -> Option<&Stats> {
        self.stats.last()
    }
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Observer<S> for Recorder<S> {
    fn render(&mut self, snapshot: S) {
        self.frames.push(snapshot);
    }

    fn on_stats(&mut self, stats: &Stats) {
        self.stats.push(stats.clone());
    }
}

/// Adapts a render closure, and optionally a stats closure, into an [`Observer`]
pub struct Callbacks<R, T> {
    render: R,
    stats: T,
}

impl<R> Callbacks<R, fn(&Stats)> {
    pub fn new(render: R) -> Self {
        fn ignore(_: &Stats) {}
        Callbacks {
            render,
            stats: ignore,
        }
    }
}

impl<R, T> Callbacks<R, T> {
    pub fn with_stats<U>(self, stats: U) -> Callbacks<R, U>
    where
        U: FnMut(&Stats),
    {
        Callbacks {
            render: self.render,
            stats,
        }
    }
}

impl<S, R, T> Observer<S> for Callbacks<R, T>
where
    R: FnMut(S),
    T: FnMut(&Stats),
{
    fn render(&mut self, snapshot: S) {
        (self.render)(snapshot)
    }

    fn on_stats(&mut self, stats: &Stats) {
        (self.stats)(stats)
    }
}

/// Cooperative step driver bound to one [`RunController`]
#[derive(Debug, Clone)]
pub struct Scheduler {
    controller: Arc<RunController>,
}

impl Scheduler {
    pub fn new(controller: Arc<RunController>) -> Self {
        Scheduler { controller }
    }

    pub fn controller(&self) -> &Arc<RunController> {
        &self.controller
    }

    /// Claim the controller synchronously; the returned run is driven later
    pub fn begin(&self) -> Result<ActiveRun> {
        let ticket = self.controller.begin()?;
        Ok(ActiveRun {
            ticket,
            poll: self.controller.config().pause_poll_interval,
        })
    }

    /// Run `algorithm` to completion or cancellation
    pub async fn run<A, O>(&self, algorithm: &mut A, observer: &mut O) -> Result<Outcome<A::Output>>
    where
        A: StepAlgorithm,
        O: Observer<A::Snapshot>,
    {
        let run = self.begin()?;
        Ok(run.drive(algorithm, observer).await)
    }
}

/// A run that owns its controller claim
#[derive(Debug)]
pub struct ActiveRun {
    ticket: RunTicket,
    poll: Duration,
}

impl ActiveRun {
    /// Drive the algorithm step by step.
    ///
    /// Before every step the cancel flag is checked first, then the pause
    /// flag; the pause poll and the post-step delay are the only suspension
    /// points.
    pub async fn drive<A, O>(self, algorithm: &mut A, observer: &mut O) -> Outcome<A::Output>
    where
        A: StepAlgorithm,
        O: Observer<A::Snapshot>,
    {
        let name = algorithm.name();
        info!("{} run started", name);
        let mut steps: u64 = 0;

        loop {
            if self.ticket.is_cancelled() {
                algorithm.settle();
                observer.render(algorithm.snapshot());
                observer.on_stats(&algorithm.stats());
                info!("{} run cancelled after {} steps", name, steps);
                return Outcome::Cancelled;
            }

            if self.ticket.is_paused() {
                debug!("{} run waiting on pause", name);
                while self.ticket.is_paused() && !self.ticket.is_cancelled() {
                    tokio::time::sleep(self.poll).await;
                }
                continue;
            }

            match algorithm.step() {
                Step::Continue(hint) => {
                    steps += 1;
                    observer.render(algorithm.snapshot());
                    observer.on_stats(&algorithm.stats());

                    let delay = self.ticket.controller().scaled_delay(hint);
                    if delay.is_zero() {
                        tokio::task::yield_now().await;
                    } else {
                        tokio::time::sleep(delay).await;
                    }
                }
                Step::Finished(output) => {
                    observer.render(algorithm.snapshot());
                    observer.on_stats(&algorithm.stats());
                    info!("{} run completed after {} steps", name, steps + 1);
                    return Outcome::Completed(output);
                }
            }
        }
    }
}

/// Run an algorithm to completion with no controller and no delays
pub fn drive<A, O>(algorithm: &mut A, observer: &mut O) -> A::Output
where
    A: StepAlgorithm,
    O: Observer<A::Snapshot>,
{
    loop {
        let step = algorithm.step();
        observer.render(algorithm.snapshot());
        observer.on_stats(&algorithm.stats());
        if let Step::Finished(output) = step {
            return output;
        }
    }
}
