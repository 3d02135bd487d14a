// Deferred and repeating actions keyed by game time

use super::entity::EntityId;

/// Shortest repeat period a timer accepts, in seconds
const MIN_INTERVAL: f32 = 0.001;

/// Missed periods replayed by one poll before a timer skips ahead
const MAX_CATCH_UP: u32 = 32;

/// Handle to a scheduled action, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<A> {
    handle: TimerHandle,
    /// Actor whose destruction cancels this timer
    owner: Option<EntityId>,
    /// Game time of the next firing
    due: f32,
    /// Repeat period, `None` for fire-once timers
    interval: Option<f32>,
    action: A,
}

/// Fires actions once game time reaches their due time
///
/// Actions are plain values handed back by [`Scheduler::poll`]; the owner
/// decides what they mean. Timers tied to an owner entity are dropped with
/// [`Scheduler::cancel_owner`] when that entity is destroyed, so no action
/// ever reaches a disposed actor.
#[derive(Debug)]
pub struct Scheduler<A> {
    timers: Vec<Timer<A>>,
    next_handle: u64,
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }

    /// Fire `action` once, `delay` seconds after `now`
    pub fn after(
        &mut self,
        now: f32,
        delay: f32,
        owner: Option<EntityId>,
        action: A,
    ) -> TimerHandle {
        self.insert(now + delay.max(0.0), None, owner, action)
    }

    /// Fire `action` `delay` seconds after `now`, then every `interval` seconds
    ///
    /// A non-positive interval degrades to a fire-once timer; shorter
    /// intervals than a millisecond are stretched to one.
    pub fn every(
        &mut self,
        now: f32,
        delay: f32,
        interval: f32,
        owner: Option<EntityId>,
        action: A,
    ) -> TimerHandle {
        let interval = if interval >= MIN_INTERVAL {
            Some(interval)
        } else if interval > 0.0 {
            log::warn!("Timer interval {} raised to {}", interval, MIN_INTERVAL);
            Some(MIN_INTERVAL)
        } else {
            log::warn!("Repeating timer with interval {} fires only once", interval);
            None
        };
        self.insert(now + delay.max(0.0), interval, owner, action)
    }

    /// Cancel one timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel every timer owned by `owner`, returns how many were dropped
    pub fn cancel_owner(&mut self, owner: EntityId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != Some(owner));
        before - self.timers.len()
    }

    /// Number of live timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Collect every action due at or before `now`, in due-time order
    ///
    /// A repeating timer that fell several periods behind fires once per
    /// missed period, up to a limit. Past that limit, or once the period is
    /// lost in the precision of `now`, it skips ahead to one period after
    /// `now`.
    pub fn poll(&mut self, now: f32) -> Vec<A> {
        let mut fired: Vec<(f32, u64, A)> = Vec::new();

        for timer in &mut self.timers {
            let mut replayed = 0;
            while timer.due <= now {
                fired.push((timer.due, timer.handle.0, timer.action.clone()));
                let Some(interval) = timer.interval else {
                    break;
                };
                replayed += 1;
                let next = timer.due + interval;
                if next <= timer.due || replayed >= MAX_CATCH_UP {
                    log::debug!(
                        "Timer {} skipped ahead after {} firings",
                        timer.handle.0,
                        replayed
                    );
                    timer.due = now + interval;
                    break;
                }
                timer.due = next;
            }
        }

        self.timers
            .retain(|t| t.interval.is_some() || t.due > now);

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, action)| action).collect()
    }

    fn insert(
        &mut self,
        due: f32,
        interval: Option<f32>,
        owner: Option<EntityId>,
        action: A,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            owner,
            due,
            interval,
            action,
        });
        handle
    }
}

impl<A: Clone> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
