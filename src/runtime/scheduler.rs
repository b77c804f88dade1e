//! Tokio-backed tick scheduler.
//!
//! Each subscription is a spawned task driving a `tokio::time::interval`
//! that feeds `Command::Tick` into the runtime's command channel.
//! Cancelling a subscription aborts its task.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use crate::engine::{Command, TickScheduler};
use crate::types::{Millis, SubscriptionHandle};

/// Schedules ticks on the ambient tokio runtime.
///
/// `schedule_tick` must be called from within a tokio runtime.
pub struct TokioScheduler {
    commands: mpsc::UnboundedSender<Command>,
    tasks: HashMap<SubscriptionHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(commands: mpsc::UnboundedSender<Command>) -> Self {
        Self {
            commands,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of subscriptions currently ticking.
    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule_tick(&mut self, period_ms: Millis) -> SubscriptionHandle {
        self.next_id += 1;
        let handle = SubscriptionHandle(self.next_id);
        let commands = self.commands.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(period_ms.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if commands.send(Command::Tick).is_err() {
                    debug!(?handle, "command channel closed, tick task exiting");
                    break;
                }
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel_tick(&mut self, handle: SubscriptionHandle) {
        match self.tasks.remove(&handle) {
            Some(task) => task.abort(),
            None => warn!(?handle, "cancel requested for unknown tick subscription"),
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
