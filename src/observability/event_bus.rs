//! Tokio broadcast event bus for store change notifications.

use crate::models::{ChangeEvent, EntityKind};
use std::sync::OnceLock;
use tokio::sync::broadcast;

const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Central bus broadcasting [`ChangeEvent`]s to subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

/// Receiver that yields only events matching a predicate.
pub struct FilteredReceiver<F> {
    receiver: broadcast::Receiver<ChangeEvent>,
    predicate: F,
}

impl EventBus {
    /// Creates a new event bus with the given buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers (best effort).
    ///
    /// Having no subscribers is not an error.
    #[allow(clippy::cast_precision_loss)]
    pub fn publish(&self, event: ChangeEvent) {
        metrics::counter!("event_bus_publish_total", "kind" => event.kind.as_str()).increment(1);
        metrics::gauge!("event_bus_receivers").set(self.sender.receiver_count() as f64);
        if self.sender.send(event).is_err() {
            metrics::counter!("event_bus_publish_dropped_total").increment(1);
        }
    }

    /// Subscribes to all events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        metrics::counter!("event_bus_subscriptions_total").increment(1);
        self.sender.subscribe()
    }

    /// Subscribes with a predicate.
    #[must_use]
    pub fn subscribe_filtered<F>(&self, predicate: F) -> FilteredReceiver<F>
    where
        F: Fn(&ChangeEvent) -> bool,
    {
        FilteredReceiver {
            receiver: self.subscribe(),
            predicate,
        }
    }

    /// Subscribes to writes of one entity kind.
    #[must_use]
    pub fn subscribe_kind(
        &self,
        kind: EntityKind,
    ) -> FilteredReceiver<impl Fn(&ChangeEvent) -> bool> {
        self.subscribe_filtered(move |event| event.kind == kind)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

impl<F> FilteredReceiver<F>
where
    F: Fn(&ChangeEvent) -> bool,
{
    /// Receives the next matching event.
    ///
    /// # Errors
    ///
    /// Returns [`broadcast::error::RecvError::Closed`] once every sender is gone.
    pub async fn recv(&mut self) -> Result<ChangeEvent, broadcast::error::RecvError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if (self.predicate)(&event) => return Ok(event),
                Ok(_) => {},
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    metrics::counter!("event_bus_lagged_total").increment(skipped);
                },
                Err(err) => return Err(err),
            }
        }
    }

    /// Returns the next matching event that is already buffered.
    ///
    /// # Errors
    ///
    /// Returns [`broadcast::error::TryRecvError::Empty`] once the buffer
    /// holds no more matching events.
    pub fn try_recv(&mut self) -> Result<ChangeEvent, broadcast::error::TryRecvError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if (self.predicate)(&event) => return Ok(event),
                Ok(_) => {},
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    metrics::counter!("event_bus_lagged_total").increment(skipped);
                    tracing::warn!(skipped, "event subscriber lagged, events dropped");
                },
                Err(err) => return Err(err),
            }
        }
    }
}

static GLOBAL_EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Returns the process-wide event bus, creating it on first use.
#[must_use]
pub fn global_event_bus() -> &'static EventBus {
    GLOBAL_EVENT_BUS.get_or_init(EventBus::default)
}
