use crate::{
    config::DEFAULT_DRIFT_THRESHOLD_MS,
    foundation::error::{PixrevealError, PixrevealResult},
    stage::mapper::elapsed_fraction,
};

/// Study session length and what is left of it.
///
/// `remaining_seconds <= total_seconds` always holds; reaching zero is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerSession {
    total_seconds: u32,
    remaining_seconds: u32,
}

impl TimerSession {
    pub fn new(total_seconds: u32) -> PixrevealResult<Self> {
        if total_seconds == 0 {
            return Err(PixrevealError::validation(
                "session duration must be > 0 seconds",
            ));
        }
        Ok(Self {
            total_seconds,
            remaining_seconds: total_seconds,
        })
    }

    pub fn from_minutes(minutes: u32) -> PixrevealResult<Self> {
        let secs = minutes
            .checked_mul(60)
            .ok_or_else(|| PixrevealError::validation("session duration overflows"))?;
        Self::new(secs)
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_seconds == 0
    }

    pub fn elapsed_fraction(&self) -> f64 {
        elapsed_fraction(self.total_seconds, self.remaining_seconds)
    }

    /// Take one second off; false once already finished.
    fn decrement(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        true
    }
}

/// What one countdown tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub decremented: bool,
    /// Set on the tick that brought the session to zero.
    pub finished: bool,
}

/// Once-per-second trigger with a drift guard.
///
/// Every tick measures the wall-clock time since the previous one and only
/// takes a second off when at least `threshold_ms` has passed. An early
/// tick is absorbed, and the time it covered is not carried forward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownDriver {
    session: TimerSession,
    threshold_ms: u64,
    last_tick_ms: Option<u64>,
    running: bool,
}

impl CountdownDriver {
    pub fn new(session: TimerSession) -> Self {
        Self::with_threshold(session, DEFAULT_DRIFT_THRESHOLD_MS)
    }

    pub fn with_threshold(session: TimerSession, threshold_ms: u64) -> Self {
        Self {
            session,
            threshold_ms: threshold_ms.max(1),
            last_tick_ms: None,
            running: false,
        }
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.session.is_finished() {
            return;
        }
        self.running = true;
        self.last_tick_ms = Some(now_ms);
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.last_tick_ms = None;
    }

    /// Resume after [`CountdownDriver::pause`]. The paused interval is not
    /// counted toward the next tick.
    pub fn resume(&mut self, now_ms: u64) {
        self.start(now_ms);
    }

    /// Tick at wall-clock `now_ms`. Ignored while paused.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if !self.running {
            return TickOutcome::default();
        }
        let delta = match self.last_tick_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_tick_ms = Some(now_ms);
        self.advance(delta)
    }

    /// Tick with an already measured delta since the previous tick.
    pub fn advance(&mut self, delta_ms: u64) -> TickOutcome {
        if !self.running {
            return TickOutcome::default();
        }
        if delta_ms < self.threshold_ms || !self.session.decrement() {
            return TickOutcome::default();
        }
        let finished = self.session.is_finished();
        if finished {
            self.running = false;
            self.last_tick_ms = None;
        }
        TickOutcome {
            decremented: true,
            finished,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/countdown.rs"]
mod tests;
