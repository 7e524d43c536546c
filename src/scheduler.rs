//! Cancellable repeating tick timer
//!
//! At most one schedule is live at a time: starting or rescheduling drops the
//! previous `Interval` before the new one is installed, so an old period can never
//! fire alongside a new one.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug, Default)]
pub struct TickScheduler {
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Begin firing every `period`. The first tick comes one full period from now.
    pub fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Replace the running schedule with one at a new period
    pub fn reschedule(&mut self, period: Duration) {
        self.start(period);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next tick. Never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.start(Duration::from_millis(170));

        let began = Instant::now();
        scheduler.tick().await;
        assert_eq!(began.elapsed(), Duration::from_millis(170));

        scheduler.tick().await;
        assert_eq!(began.elapsed(), Duration::from_millis(340));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.start(Duration::from_millis(170));
        scheduler.tick().await;

        scheduler.reschedule(Duration::from_millis(168));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(168)));

        let began = Instant::now();
        scheduler.tick().await;
        scheduler.tick().await;
        assert_eq!(began.elapsed(), Duration::from_millis(336));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_scheduler_never_fires() {
        let mut scheduler = TickScheduler::new();
        assert!(!scheduler.is_active());
        assert!(
            timeout(Duration::from_secs(5), scheduler.tick())
                .await
                .is_err()
        );

        scheduler.start(Duration::from_millis(100));
        assert!(scheduler.is_active());
        scheduler.stop();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.period(), None);
        assert!(
            timeout(Duration::from_secs(5), scheduler.tick())
                .await
                .is_err()
        );
    }
}
