use std::time::Duration;

use bevy::prelude::*;

use super::HudSystem;

pub struct CountdownPlugin;
impl Plugin for CountdownPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CountdownFinished>()
            .add_systems(
                Update,
                Countdown::tick
                    .in_set(HudSystem::Tick)
                    .run_if(any_with_component::<Countdown>),
            )
            .add_systems(
                Update,
                CountdownFill::sync
                    .in_set(HudSystem::Present)
                    .run_if(any_with_component::<CountdownFill>),
            );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownOutcome {
    Completed,
    Cancelled,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownFinished {
    pub entity: Entity,
    pub outcome: CountdownOutcome,
}

/// Time-based countdown measured against the real clock from the first frame
/// it is observed. Dropped frames shorten nothing: the remaining time is always
/// `duration - (now - start)`.
#[derive(Component, Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    remaining: Duration,
    started_at: Option<Duration>,
    cancellable: bool,
    outcome: Option<CountdownOutcome>,
}

impl Countdown {
    pub fn new(duration: Duration, cancellable: bool) -> Self {
        Self {
            duration,
            remaining: duration,
            started_at: None,
            cancellable,
            outcome: None,
        }
    }

    /// Host durations arrive as possibly fractional milliseconds.
    pub fn from_millis(millis: f64, cancellable: bool) -> Self {
        Self::new(host_duration(millis / 1000.0), cancellable)
    }

    pub fn from_secs(secs: f64, cancellable: bool) -> Self {
        Self::new(host_duration(secs), cancellable)
    }

    /// Advances to `now`; returns `Completed` exactly once.
    pub fn advance(&mut self, now: Duration) -> Option<CountdownOutcome> {
        if self.outcome.is_some() {
            return None;
        }

        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        self.remaining = self.duration.saturating_sub(elapsed);

        if self.remaining.is_zero() {
            self.outcome = Some(CountdownOutcome::Completed);
            return self.outcome;
        }
        None
    }

    /// Resolves as cancelled. Refused when not cancellable or already resolved.
    pub fn cancel(&mut self) -> bool {
        if !self.cancellable || self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(CountdownOutcome::Cancelled);
        true
    }

    pub fn fraction_remaining(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    pub fn remaining_whole_secs(&self) -> u64 {
        self.remaining.as_secs_f64().ceil() as u64
    }

    fn tick(
        time: Res<Time<Real>>,
        mut query: Query<(Entity, &mut Countdown)>,
        mut finished: EventWriter<CountdownFinished>,
    ) {
        let now = time.elapsed();
        for (entity, mut countdown) in query.iter_mut() {
            if let Some(outcome) = countdown.advance(now) {
                finished.write(CountdownFinished { entity, outcome });
            }
        }
    }
}

/// Negative and NaN durations are zero; ones too long to represent never end.
fn host_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or_else(|_| {
        warn!("host duration of {secs}s is out of range; counting down forever");
        Duration::MAX
    })
}

/// Depleting fill whose width tracks the `Countdown` on `owner`.
#[derive(Component, Debug, Clone, Copy)]
pub struct CountdownFill {
    pub owner: Entity,
}

impl CountdownFill {
    fn sync(
        countdowns: Query<&Countdown>,
        mut fills: Query<(&CountdownFill, &mut Node)>,
    ) {
        for (fill, mut node) in fills.iter_mut() {
            if let Ok(countdown) = countdowns.get(fill.owner) {
                node.width = Val::Percent(countdown.fraction_remaining() * 100.0);
            }
        }
    }
}
