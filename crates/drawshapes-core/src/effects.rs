//! Periodic effects on shapes.
//!
//! An effect is a task with a target set, an iteration budget and a fixed interval. Nothing here
//! spawns threads or sleeps: the controller calls [`EffectScheduler::poll`] and waits until
//! [`EffectScheduler::next_due`] between polls. The first step of a new task is due immediately.

use crate::scene::Scene;
use crate::shapes::{ScaleDirection, ShapeId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default pulse duration in milliseconds.
pub const PULSE_TOTAL_MS: u64 = 10_000;
/// Default interval between pulse steps in milliseconds.
pub const PULSE_INTERVAL_MS: u64 = 300;
/// Default dance duration in milliseconds.
pub const DANCE_TOTAL_MS: u64 = 5_000;
/// Default interval between dance steps in milliseconds.
pub const DANCE_INTERVAL_MS: u64 = 100;
/// Dance offsets are drawn from `-DANCE_REACH..DANCE_REACH` on each axis.
pub const DANCE_REACH: i32 = 10;

/// The kinds of effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Alternately scale up and down, recoloring on every step.
    Pulse,
    /// Jitter position randomly.
    Dance,
}

/// Duration and interval of one effect kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTiming {
    pub total_ms: u64,
    pub interval_ms: u64,
}

impl EffectTiming {
    pub const PULSE: EffectTiming = EffectTiming {
        total_ms: PULSE_TOTAL_MS,
        interval_ms: PULSE_INTERVAL_MS,
    };

    pub const DANCE: EffectTiming = EffectTiming {
        total_ms: DANCE_TOTAL_MS,
        interval_ms: DANCE_INTERVAL_MS,
    };

    /// Whole steps that fit into the total duration, capped at `u32::MAX`.
    pub fn iterations(&self) -> u32 {
        if self.interval_ms == 0 {
            return 0;
        }
        u32::try_from(self.total_ms / self.interval_ms).unwrap_or(u32::MAX)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// A running effect.
#[derive(Debug, Clone)]
pub struct EffectTask {
    kind: EffectKind,
    targets: Vec<ShapeId>,
    remaining: u32,
    interval: Duration,
    last_step: Option<Instant>,
    /// Next pulse direction.
    grow: bool,
}

impl EffectTask {
    pub fn new(kind: EffectKind, targets: Vec<ShapeId>, timing: EffectTiming) -> Self {
        Self {
            kind,
            targets,
            remaining: timing.iterations(),
            interval: timing.interval(),
            last_step: None,
            grow: true,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn targets(&self) -> &[ShapeId] {
        &self.targets
    }

    /// Steps left in the budget.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// When the next step should run.
    pub fn due_at(&self, now: Instant) -> Instant {
        match self.last_step {
            Some(last) => last + self.interval,
            None => now,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.is_finished() && self.due_at(now) <= now
    }

    /// Apply one step to every target still in the scene.
    pub fn step<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        if self.is_finished() {
            return;
        }

        let direction = if self.grow {
            ScaleDirection::Up
        } else {
            ScaleDirection::Down
        };

        for &id in &self.targets {
            let Some(shape) = scene.get_mut(id) else {
                continue;
            };
            match self.kind {
                EffectKind::Pulse => {
                    let scaled = match direction {
                        ScaleDirection::Up => shape.scale_up(),
                        ScaleDirection::Down => shape.scale_down(),
                    };
                    if let Err(e) = scaled {
                        log::debug!("Pulse recolors only: {}", e);
                    }
                    shape.animate_with(rng);
                }
                EffectKind::Dance => {
                    let dx = rng.random_range(-DANCE_REACH..DANCE_REACH);
                    let dy = rng.random_range(-DANCE_REACH..DANCE_REACH);
                    shape.move_by(dx, dy);
                }
            }
        }

        self.grow = !self.grow;
        self.remaining -= 1;
    }

    fn mark_stepped(&mut self, now: Instant) {
        self.last_step = Some(now);
    }
}

/// Holds running effect tasks and steps the due ones.
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    tasks: Vec<EffectTask>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a task. Tasks without targets or without a budget are discarded.
    pub fn start(&mut self, task: EffectTask) {
        if task.targets.is_empty() || task.is_finished() {
            log::debug!("Ignoring empty {:?} effect", task.kind);
            return;
        }
        log::debug!(
            "Starting {:?} effect on {} shapes for {} steps",
            task.kind,
            task.targets.len(),
            task.remaining
        );
        self.tasks.push(task);
    }

    /// Step every due task using the thread-local random source.
    pub fn poll(&mut self, now: Instant, scene: &mut Scene) -> bool {
        self.poll_with(now, scene, &mut rand::rng())
    }

    /// Step every due task. Returns true if anything changed and a redraw is needed.
    pub fn poll_with<R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        scene: &mut Scene,
        rng: &mut R,
    ) -> bool {
        let mut stepped = false;
        for task in self.tasks.iter_mut().filter(|t| t.is_due(now)) {
            task.step(scene, rng);
            task.mark_stepped(now);
            stepped = true;
        }

        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_finished());
        if self.tasks.len() < before {
            log::debug!("{} effect(s) finished", before - self.tasks.len());
        }
        stepped
    }

    /// Earliest time any task wants to step, or `None` when idle.
    pub fn next_due(&self, now: Instant) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due_at(now)).min()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task. Shapes keep whatever state the last step left them in.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }
}
