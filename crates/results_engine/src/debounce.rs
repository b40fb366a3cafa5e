use std::time::Duration;

use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer: at most one pending action at a time, and arming
/// the timer again drops whatever was pending.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `fire` after the configured delay unless rescheduled or cancelled first.
    pub fn schedule(&mut self, fire: impl FnOnce() + Send + 'static) {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire();
        }));
    }

    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::DebounceTimer;

    #[tokio::test(start_paused = true)]
    async fn reschedule_keeps_only_the_latest_action() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut timer = DebounceTimer::new(Duration::from_millis(700));

        let sink = Arc::clone(&fired);
        timer.schedule(move || sink.lock().unwrap().push("first"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        let sink = Arc::clone(&fired);
        timer.schedule(move || sink.lock().unwrap().push("second"));
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["second"]);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_action() {
        let fired = Arc::new(Mutex::new(false));
        let mut timer = DebounceTimer::new(Duration::from_millis(50));
        let sink = Arc::clone(&fired);
        timer.schedule(move || *sink.lock().unwrap() = true);

        assert!(timer.cancel());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!*fired.lock().unwrap());
        assert!(!timer.cancel());
    }
}
