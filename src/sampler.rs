use std::time::{Duration, Instant};

pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Shortest period a timer accepts; anything below is clamped up to it
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Cancelable periodic timer for the per-second sampler.
///
/// The event loop wakes up far more often than once a second; `poll` turns
/// wall-clock progress into whole periods. Once canceled it yields nothing
/// until started again.
#[derive(Debug, Clone)]
pub struct SampleTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for SampleTimer {
    fn default() -> Self {
        Self::new(SAMPLE_PERIOD)
    }
}

impl SampleTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of whole periods that elapsed up to `now`, advancing the
    /// deadline past them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while now >= due {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_never_fires() {
        let mut timer = SampleTimer::default();
        assert!(!timer.is_active());
        assert_eq!(timer.poll(Instant::now() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn fires_once_per_elapsed_period() {
        let start = Instant::now();
        let mut timer = SampleTimer::default();
        timer.start(start);

        assert_eq!(timer.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(1000)), 1);
        assert_eq!(timer.poll(start + Duration::from_millis(1500)), 0);
        // a stalled loop catches up on missed periods
        assert_eq!(timer.poll(start + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn canceled_timer_stays_silent() {
        let start = Instant::now();
        let mut timer = SampleTimer::default();
        timer.start(start);
        timer.cancel();
        timer.cancel();

        assert!(!timer.is_active());
        assert_eq!(timer.poll(start + Duration::from_secs(5)), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        let start = Instant::now();
        let mut timer = SampleTimer::new(Duration::ZERO);
        timer.start(start);

        assert_eq!(timer.poll(start), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(5)), 5);
    }

    #[test]
    fn restart_rearms_from_new_instant() {
        let start = Instant::now();
        let mut timer = SampleTimer::new(Duration::from_millis(100));
        timer.start(start);
        timer.cancel();

        let later = start + Duration::from_secs(3);
        timer.start(later);
        assert_eq!(timer.poll(later + Duration::from_millis(50)), 0);
        assert_eq!(timer.poll(later + Duration::from_millis(100)), 1);
    }
}
