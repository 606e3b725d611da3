//! Append-only record of what the dispatch service did.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dispatch_core::{CourierId, Location, OrderId};

/// Event: something happened to a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryEvent {
    OrderAssigned {
        order_id: OrderId,
        courier_id: CourierId,
        occurred_at: DateTime<Utc>,
    },
    CourierMoved {
        courier_id: CourierId,
        from: Location,
        to: Location,
        occurred_at: DateTime<Utc>,
    },
    OrderCompleted {
        order_id: OrderId,
        courier_id: CourierId,
        occurred_at: DateTime<Utc>,
    },
}

impl DeliveryEvent {
    /// Stable event name (e.g. "delivery.order.assigned").
    pub fn event_type(&self) -> &'static str {
        match self {
            DeliveryEvent::OrderAssigned { .. } => "delivery.order.assigned",
            DeliveryEvent::CourierMoved { .. } => "delivery.courier.moved",
            DeliveryEvent::OrderCompleted { .. } => "delivery.order.completed",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DeliveryEvent::OrderAssigned { occurred_at, .. }
            | DeliveryEvent::CourierMoved { occurred_at, .. }
            | DeliveryEvent::OrderCompleted { occurred_at, .. } => *occurred_at,
        }
    }
}

/// In-memory journal of delivery events, in append order.
#[derive(Debug, Default)]
pub struct Journal {
    inner: Mutex<Vec<DeliveryEvent>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, event: DeliveryEvent) {
        tracing::debug!(event_type = event.event_type(), "journal append");
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<DeliveryEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Entries are pushed whole, so a poisoned log is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<DeliveryEvent>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("journal lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
