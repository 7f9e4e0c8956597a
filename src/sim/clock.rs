//! Simulation clock
//!
//! Two periodic tasks (the fixed step and the spawner) plus the continuous
//! frame step, all driven from host timestamps in milliseconds. Every run of
//! the clock gets a fresh `Epoch`; cancelling bumps it, so anything still
//! holding the old epoch can tell it is stale.

use crate::consts::*;

/// A periodic task's schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    pub period_ms: f64,
    next_due_ms: f64,
}

impl Cadence {
    /// First firing one period after `start_ms`
    pub fn new(period_ms: f64, start_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        self.next_due_ms <= now_ms
    }

    /// Consume the pending firing, returning its scheduled time
    fn fire(&mut self) -> f64 {
        let at = self.next_due_ms;
        self.next_due_ms += self.period_ms;
        at
    }

    /// Drop every missed firing up to `now_ms`, keeping the phase
    fn skip_backlog(&mut self, now_ms: f64) {
        if self.next_due_ms <= now_ms {
            let missed = ((now_ms - self.next_due_ms) / self.period_ms).floor() + 1.0;
            self.next_due_ms += missed * self.period_ms;
        }
    }
}

/// Which periodic task is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTask {
    /// Bullets, enemies, combat
    Fixed,
    /// Spawner
    Spawn,
}

/// A task firing and the time it was scheduled for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Due {
    pub task: ClockTask,
    pub at_ms: f64,
}

/// Cancellation token for one run of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch(u64);

/// Drives both cadences and the continuous step
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    fixed: Option<Cadence>,
    spawn: Option<Cadence>,
    last_frame_ms: Option<f64>,
    epoch: u64,
    /// Firings handed out for the current `burst_at` timestamp
    burst: u32,
    burst_at: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule both tasks from `now_ms`, cancelling any previous run
    pub fn start(&mut self, now_ms: f64) -> Epoch {
        self.cancel();
        self.fixed = Some(Cadence::new(FIXED_TICK_MS, now_ms));
        self.spawn = Some(Cadence::new(SPAWN_INTERVAL_MS, now_ms));
        self.last_frame_ms = Some(now_ms);
        self.epoch()
    }

    /// Drop both tasks and the frame timer; no firing survives this
    pub fn cancel(&mut self) {
        self.fixed = None;
        self.spawn = None;
        self.last_frame_ms = None;
        self.burst = 0;
        self.burst_at = None;
        self.epoch += 1;
    }

    pub fn is_running(&self) -> bool {
        self.fixed.is_some()
    }

    pub fn epoch(&self) -> Epoch {
        Epoch(self.epoch)
    }

    /// Whether `epoch` still belongs to the live run
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.is_running() && epoch.0 == self.epoch
    }

    /// Next task due at or before `now_ms`, earliest first.
    ///
    /// On a tie the fixed step goes first. After `MAX_CATCHUP_TICKS`
    /// firings for the same `now_ms` the remaining backlog is discarded.
    pub fn poll(&mut self, now_ms: f64) -> Option<Due> {
        if self.burst_at != Some(now_ms) {
            self.burst_at = Some(now_ms);
            self.burst = 0;
        }
        let fixed_due = self.fixed.filter(|c| c.is_due(now_ms));
        let spawn_due = self.spawn.filter(|c| c.is_due(now_ms));

        let task = match (fixed_due, spawn_due) {
            (None, None) => {
                self.burst = 0;
                return None;
            }
            (Some(_), None) => ClockTask::Fixed,
            (None, Some(_)) => ClockTask::Spawn,
            (Some(f), Some(s)) => {
                if s.next_due_ms() < f.next_due_ms() {
                    ClockTask::Spawn
                } else {
                    ClockTask::Fixed
                }
            }
        };

        if self.burst >= MAX_CATCHUP_TICKS {
            log::warn!("Clock fell behind at {:.0}ms, dropping backlog", now_ms);
            for cadence in [&mut self.fixed, &mut self.spawn].into_iter().flatten() {
                cadence.skip_backlog(now_ms);
            }
            self.burst = 0;
            return None;
        }
        self.burst += 1;

        let cadence = match task {
            ClockTask::Fixed => self.fixed.as_mut(),
            ClockTask::Spawn => self.spawn.as_mut(),
        }?;
        Some(Due {
            task,
            at_ms: cadence.fire(),
        })
    }

    /// Seconds since the previous frame, capped at `MAX_FRAME_DT`
    pub fn frame_dt(&mut self, now_ms: f64) -> Option<f32> {
        let last = self.last_frame_ms.replace(now_ms)?;
        let dt = ((now_ms - last) / 1000.0) as f32;
        Some(dt.clamp(0.0, MAX_FRAME_DT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut SimClock, now_ms: f64) -> Vec<Due> {
        std::iter::from_fn(|| clock.poll(now_ms)).collect()
    }

    #[test]
    fn test_idle_clock_never_fires() {
        let mut clock = SimClock::new();
        assert!(clock.poll(1e6).is_none());
        assert!(clock.frame_dt(1e6).is_none());
        assert!(!clock.is_running());
    }

    #[test]
    fn test_fixed_cadence() {
        let mut clock = SimClock::new();
        clock.start(1000.0);
        assert!(clock.poll(1049.0).is_none());
        let fired = drain(&mut clock, 1160.0);
        let times: Vec<f64> = fired.iter().map(|d| d.at_ms).collect();
        assert_eq!(times, vec![1050.0, 1100.0, 1150.0]);
        assert!(fired.iter().all(|d| d.task == ClockTask::Fixed));
    }

    #[test]
    fn test_spawn_interleaves_after_fixed_on_tie() {
        let mut clock = SimClock::new();
        clock.start(0.0);
        for n in 1..=29 {
            assert_eq!(clock.poll(n as f64 * 50.0).map(|d| d.task), Some(ClockTask::Fixed));
        }
        let at_1500 = drain(&mut clock, 1500.0);
        assert_eq!(
            at_1500,
            vec![
                Due { task: ClockTask::Fixed, at_ms: 1500.0 },
                Due { task: ClockTask::Spawn, at_ms: 1500.0 },
            ]
        );
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut clock = SimClock::new();
        clock.start(0.0);
        let fired = drain(&mut clock, 10_000.0);
        assert_eq!(fired.len() as u32, MAX_CATCHUP_TICKS);
        // Schedule resumes in phase just after `now`
        assert!(clock.poll(10_000.0).is_none());
        assert_eq!(clock.poll(10_050.0).map(|d| d.at_ms), Some(10_050.0));
    }

    #[test]
    fn test_cancel_stops_everything_and_stales_epoch() {
        let mut clock = SimClock::new();
        let epoch = clock.start(0.0);
        assert!(clock.is_current(epoch));
        clock.cancel();
        assert!(!clock.is_current(epoch));
        assert!(clock.poll(5000.0).is_none());
        assert!(clock.frame_dt(5000.0).is_none());
    }

    #[test]
    fn test_restart_issues_new_epoch() {
        let mut clock = SimClock::new();
        let first = clock.start(0.0);
        let second = clock.start(100.0);
        assert_ne!(first, second);
        assert!(!clock.is_current(first));
        // Old schedule is gone: nothing due before 150
        assert!(clock.poll(140.0).is_none());
        assert_eq!(clock.poll(150.0).map(|d| d.at_ms), Some(150.0));
    }

    #[test]
    fn test_frame_dt_capped() {
        let mut clock = SimClock::new();
        clock.start(0.0);
        assert_eq!(clock.frame_dt(16.0), Some(0.016));
        assert_eq!(clock.frame_dt(5016.0), Some(MAX_FRAME_DT));
        // Clock going backwards yields zero, not negative
        assert_eq!(clock.frame_dt(5000.0), Some(0.0));
    }
}
