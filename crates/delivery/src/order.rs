use serde::{Deserialize, Serialize};

use dispatch_core::{
    AggregateRoot, CourierId, DomainError, DomainResult, Entity, Location, OrderId,
};

use crate::courier::Courier;

/// Order status lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Assigned,
    Completed,
}

/// Aggregate root: Order.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    location: Location,
    status: OrderStatus,
    courier_id: Option<CourierId>,
    version: u64,
}

impl Order {
    /// Create an order with a caller-supplied id.
    pub fn new(id: OrderId, location: Location) -> Self {
        Self {
            id,
            location,
            status: OrderStatus::Created,
            courier_id: None,
            version: 0,
        }
    }

    /// Rebuild an order from persisted state.
    ///
    /// The courier id must be present exactly when the status is past `Created`.
    pub fn restore(
        id: OrderId,
        location: Location,
        status: OrderStatus,
        courier_id: Option<CourierId>,
        version: u64,
    ) -> DomainResult<Self> {
        match (status, courier_id) {
            (OrderStatus::Created, Some(_)) => {
                return Err(DomainError::validation(
                    "A created order cannot reference a courier",
                ));
            }
            (OrderStatus::Assigned | OrderStatus::Completed, None) => {
                return Err(DomainError::missing("courier"));
            }
            _ => {}
        }

        Ok(Self {
            id,
            location,
            status,
            courier_id,
            version,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn courier_id(&self) -> Option<CourierId> {
        self.courier_id
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Created
    }

    pub fn assign_to_courier(&mut self, courier: &Courier) -> DomainResult<()> {
        if self.status != OrderStatus::Created {
            return Err(DomainError::validation(
                "To be assigned, the order must have the CREATED status",
            ));
        }

        self.courier_id = Some(courier.id_typed());
        self.status = OrderStatus::Assigned;
        self.version += 1;
        Ok(())
    }

    /// Move the delivery point. Allowed in every status.
    pub fn relocate(&mut self, location: Location) {
        self.location = location;
        self.version += 1;
    }

    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Assigned {
            return Err(DomainError::illegal_state(
                "Only assigned orders can be completed",
            ));
        }

        self.status = OrderStatus::Completed;
        self.version += 1;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Order {
    fn version(&self) -> u64 {
        self.version
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Order {}

impl core::hash::Hash for Order {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
