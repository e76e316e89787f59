// File: ./src/pipeline.rs
// Load -> layout cycles, the shared "current events" slot and the mount/unmount lifecycle
use crate::client::{EventClient, LoadError};
use crate::layout::layout_events;
use crate::model::PlacedEvent;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loading,
    Processing,
    Rendered,
}

/// Signals that start a new cycle. `Unmount` stops the listener instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    Resize { width: u16, height: u16 },
    Recompute,
    Unmount,
}

#[derive(Debug)]
struct Slot {
    stage: Stage,
    events: Vec<PlacedEvent>,
    rendered_once: bool,
    last_error: Option<String>,
}

#[derive(Clone)]
pub struct DayView {
    client: EventClient,
    slot: Arc<Mutex<Slot>>,
    publisher: watch::Sender<Vec<PlacedEvent>>,
}

impl DayView {
    pub fn new(client: EventClient) -> Self {
        let (publisher, _) = watch::channel(Vec::new());
        Self {
            client,
            slot: Arc::new(Mutex::new(Slot {
                stage: Stage::Idle,
                events: Vec::new(),
                rendered_once: false,
                last_error: None,
            })),
            publisher,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    pub fn events(&self) -> Vec<PlacedEvent> {
        self.lock().events.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Receives every overwrite of the slot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<PlacedEvent>> {
        self.publisher.subscribe()
    }

    /// Runs one full cycle. On failure the slot keeps whatever it held before.
    pub async fn process_events(&self) -> Result<usize, LoadError> {
        self.lock().stage = Stage::Loading;

        let events = match self.client.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                error!(uri = %self.client.events_uri(), error = %e, "Failed to fetch events");
                let mut slot = self.lock();
                slot.stage = if slot.rendered_once {
                    Stage::Rendered
                } else {
                    Stage::Idle
                };
                slot.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.lock().stage = Stage::Processing;
        let placed = layout_events(events);
        let count = placed.len();

        let mut slot = self.lock();
        slot.events = placed.clone();
        slot.stage = Stage::Rendered;
        slot.rendered_once = true;
        slot.last_error = None;
        // Published under the lock so watchers never see an older list than the slot.
        self.publisher.send_replace(placed);
        drop(slot);

        info!(count, "events laid out");
        Ok(count)
    }

    /// Starts listening for triggers and fires the initial mount cycle.
    /// Must be called from within a tokio runtime.
    pub fn mount(self) -> MountedView {
        let (triggers, mut rx) = mpsc::channel::<Trigger>(32);
        let updates = self.subscribe();
        let view = self.clone();

        let listener = tokio::spawn(async move {
            let mut cycles = JoinSet::new();
            loop {
                tokio::select! {
                    trigger = rx.recv() => match trigger {
                        None | Some(Trigger::Unmount) => break,
                        Some(trigger) => {
                            debug!(?trigger, "recompute");
                            let cycle = view.clone();
                            cycles.spawn(async move {
                                // Failures are already logged and recorded in the slot.
                                let _ = cycle.process_events().await;
                            });
                        }
                    },
                    Some(_) = cycles.join_next(), if !cycles.is_empty() => {}
                }
            }
            debug!(in_flight = cycles.len(), "day view listener stopped");
        });

        let _ = triggers.try_send(Trigger::Mount);

        MountedView {
            view: self,
            triggers,
            updates,
            listener: Some(listener),
        }
    }
}

/// A mounted day view. Dropping it deregisters the listener and aborts in-flight cycles.
pub struct MountedView {
    view: DayView,
    triggers: mpsc::Sender<Trigger>,
    updates: watch::Receiver<Vec<PlacedEvent>>,
    listener: Option<JoinHandle<()>>,
}

impl MountedView {
    pub fn view(&self) -> &DayView {
        &self.view
    }

    pub fn updates(&self) -> watch::Receiver<Vec<PlacedEvent>> {
        self.updates.clone()
    }

    /// A sender for trigger sources that outlive a borrow of this view (e.g. a UI event loop).
    pub fn triggers(&self) -> mpsc::Sender<Trigger> {
        self.triggers.clone()
    }

    /// False once the listener has stopped, after `Trigger::Unmount` or an abort.
    pub fn is_listening(&self) -> bool {
        !self.triggers.is_closed()
    }

    pub async fn trigger(&self, trigger: Trigger) -> bool {
        self.triggers.send(trigger).await.is_ok()
    }

    pub async fn recompute(&self) -> bool {
        self.trigger(Trigger::Recompute).await
    }

    pub async fn resize(&self, width: u16, height: u16) -> bool {
        self.trigger(Trigger::Resize { width, height }).await
    }

    pub async fn unmount(mut self) {
        let _ = self.triggers.send(Trigger::Unmount).await;
        if let Some(listener) = self.listener.take() {
            let _ = listener.await;
        }
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}
