//! Session runtime.
//!
//! Owns the current [`Session`] snapshot and the command channel. Every
//! command (from the user or from a tick subscription) is dispatched with a
//! fresh clock reading, the resulting snapshot replaces the current one and
//! is published as a [`RuntimeEvent`].

use std::future::Future;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::scheduler::TokioScheduler;
use crate::alert::ExpiryAlert;
use crate::engine::{Command, Expiry, Orchestrator};
use crate::types::{Session, SessionConfig};

// ============================================================================
// RuntimeEvent
// ============================================================================

/// Events published by the runtime for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// A new session snapshot
    Snapshot(Session),
    /// A timer expired and the next one took over
    Expired(Expiry),
}

/// Forwards expiries to the wrapped alert and the event channel.
pub struct ForwardingAlert<A> {
    inner: A,
    events: mpsc::UnboundedSender<RuntimeEvent>,
}

impl<A: ExpiryAlert> ExpiryAlert for ForwardingAlert<A> {
    fn alert(&self, expiry: &Expiry) {
        self.inner.alert(expiry);
        if self.events.send(RuntimeEvent::Expired(expiry.clone())).is_err() {
            warn!("Event receiver dropped, expiry not published");
        }
    }
}

// ============================================================================
// SessionRuntime
// ============================================================================

/// Drives a session from a command channel.
pub struct SessionRuntime<A, C> {
    orchestrator: Orchestrator<TokioScheduler, ForwardingAlert<A>>,
    clock: C,
    session: Session,
    commands_tx: mpsc::UnboundedSender<Command>,
    commands_rx: mpsc::UnboundedReceiver<Command>,
    events_tx: mpsc::UnboundedSender<RuntimeEvent>,
}

impl<A: ExpiryAlert, C: Clock> SessionRuntime<A, C> {
    /// Creates a runtime and the receiver for its events.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: SessionConfig,
        alert: A,
        clock: C,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RuntimeEvent>)> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let scheduler = TokioScheduler::new(commands_tx.clone());
        let alert = ForwardingAlert {
            inner: alert,
            events: events_tx.clone(),
        };
        let orchestrator =
            Orchestrator::new(config, scheduler, alert).context("Invalid session configuration")?;
        let session = orchestrator.initial_session(clock.now());

        Ok((
            Self {
                orchestrator,
                clock,
                session,
                commands_tx,
                commands_rx,
                events_tx,
            },
            events_rx,
        ))
    }

    /// Returns a sender for issuing commands to this runtime.
    pub fn command_sender(&self) -> mpsc::UnboundedSender<Command> {
        self.commands_tx.clone()
    }

    /// Returns the current session snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of live tick subscriptions.
    pub fn live_subscriptions(&self) -> usize {
        self.orchestrator.scheduler().live_count()
    }

    /// Dispatches one command and publishes the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub fn apply(&mut self, command: Command) -> Result<&Session> {
        let now = self.clock.now();
        let next = self.orchestrator.dispatch(Some(&self.session), command, now);
        self.session = next;
        self.publish()?;
        Ok(&self.session)
    }

    /// Processes commands until `shutdown` resolves.
    ///
    /// Pending commands are handled before shutdown is honoured. A running
    /// timer is paused on the way out, so its tick subscription and handle
    /// are released together and a later `run` resumes from a stopped state.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("session runtime started");
        self.publish()?;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                Some(command) = self.commands_rx.recv() => {
                    self.apply(command)?;
                }
                _ = &mut shutdown => {
                    debug!("shutdown requested");
                    break;
                }
            }
        }

        self.pause_running()?;
        info!("session runtime stopped");
        Ok(())
    }

    fn publish(&self) -> Result<()> {
        self.events_tx
            .send(RuntimeEvent::Snapshot(self.session.clone()))
            .context("Failed to send snapshot event")
    }

    fn pause_running(&mut self) -> Result<()> {
        if self.session.is_running() {
            debug!("pausing running timer on shutdown");
            self.apply(Command::Toggle)?;
        }
        Ok(())
    }
}
