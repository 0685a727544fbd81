use core::time::Duration;

#[derive(Clone, Debug, PartialEq)]
struct DeferredTask<T> {
    remaining: Duration,
    payload: T,
}

/// Holds at most one deferred task driven by explicit elapsed time.
///
/// Nothing here reads a clock: the owner reports time passing through
/// [`TaskSlot::advance`] and receives the payload once the delay has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSlot<T> {
    task: Option<DeferredTask<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T> TaskSlot<T> {
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.task.as_ref().map(|task| task.remaining)
    }

    /// Schedules `payload` to fire after `delay`, replacing any pending task.
    pub fn schedule(&mut self, delay: Duration, payload: T) {
        if let Some(replaced) = self.task.replace(DeferredTask {
            remaining: delay,
            payload,
        }) {
            log::warn!(
                "replaced pending task with {:?} left",
                replaced.remaining
            );
        }
    }

    /// Drops the pending task without running it.
    pub fn cancel(&mut self) -> Option<T> {
        let task = self.task.take()?;
        log::debug!("cancelled task with {:?} left", task.remaining);
        Some(task.payload)
    }

    /// Reports `elapsed` time, returning the payload once its delay has run out.
    pub fn advance(&mut self, elapsed: Duration) -> Option<T> {
        let task = self.task.as_mut()?;
        task.remaining = task.remaining.saturating_sub(elapsed);
        if !task.remaining.is_zero() {
            return None;
        }
        self.task.take().map(|task| task.payload)
    }
}
