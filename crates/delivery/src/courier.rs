use serde::{Deserialize, Serialize};

use dispatch_core::{
    AggregateRoot, CourierId, DomainError, DomainResult, Entity, IdGenerator, Location, OrderId,
    TransportId, UuidV7Generator,
};

use crate::order::Order;
use crate::transport::{Transport, validate_name};

/// Courier availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourierStatus {
    Free,
    Busy,
}

/// Aggregate root: Courier.
///
/// A courier carries at most one order at a time. Its status is derived from the
/// assignment: `Busy` exactly when an order id is held.
#[derive(Debug, Clone)]
pub struct Courier {
    id: CourierId,
    name: String,
    transport: Transport,
    location: Location,
    order_id: Option<OrderId>,
    version: u64,
}

impl Courier {
    /// Create a free courier with freshly generated UUIDv7 identities.
    pub fn new(
        name: &str,
        transport_name: &str,
        transport_speed: i32,
        location: Location,
    ) -> DomainResult<Self> {
        Self::new_with(&UuidV7Generator, name, transport_name, transport_speed, location)
    }

    /// Create a free courier taking the courier and transport ids from `ids`.
    pub fn new_with<G: IdGenerator + ?Sized>(
        ids: &G,
        name: &str,
        transport_name: &str,
        transport_speed: i32,
        location: Location,
    ) -> DomainResult<Self> {
        validate_name(name)?;

        let id = CourierId::from_uuid(ids.generate());
        let transport = Transport::with_id(
            TransportId::from_uuid(ids.generate()),
            transport_name,
            transport_speed,
        )?;

        Ok(Self {
            id,
            name: name.to_string(),
            transport,
            location,
            order_id: None,
            version: 0,
        })
    }

    /// Rebuild a courier from persisted state.
    pub fn restore(
        id: CourierId,
        name: &str,
        transport: Transport,
        location: Location,
        order_id: Option<OrderId>,
        version: u64,
    ) -> DomainResult<Self> {
        validate_name(name)?;

        Ok(Self {
            id,
            name: name.to_string(),
            transport,
            location,
            order_id,
            version,
        })
    }

    pub fn id_typed(&self) -> CourierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn status(&self) -> CourierStatus {
        if self.order_id.is_some() {
            CourierStatus::Busy
        } else {
            CourierStatus::Free
        }
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn is_free(&self) -> bool {
        self.status() == CourierStatus::Free
    }

    pub fn has_arrived_at(&self, location: &Location) -> bool {
        self.location == *location
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        validate_name(name)?;
        self.name = name.to_string();
        self.version += 1;
        Ok(())
    }

    pub fn rename_transport(&mut self, name: &str) -> DomainResult<()> {
        self.transport.rename(name)?;
        self.version += 1;
        Ok(())
    }

    /// Replace the owned transport wholesale (new identity, new speed).
    pub fn change_transport(&mut self, name: &str, speed: i32) -> DomainResult<()> {
        self.change_transport_with(&UuidV7Generator, name, speed)
    }

    /// Like [`Courier::change_transport`], taking the new transport id from `ids`.
    pub fn change_transport_with<G: IdGenerator + ?Sized>(
        &mut self,
        ids: &G,
        name: &str,
        speed: i32,
    ) -> DomainResult<()> {
        self.transport = Transport::with_id(TransportId::from_uuid(ids.generate()), name, speed)?;
        self.version += 1;
        Ok(())
    }

    pub fn assign_order(&mut self, order: &Order) -> DomainResult<()> {
        if !self.is_free() {
            return Err(DomainError::illegal_state(
                "Cannot assign order to a not free courier",
            ));
        }

        self.order_id = Some(order.id_typed());
        self.version += 1;
        Ok(())
    }

    pub fn complete_order(&mut self) -> DomainResult<()> {
        if self.status() != CourierStatus::Busy {
            return Err(DomainError::illegal_state("Courier is not busy"));
        }

        self.order_id = None;
        self.version += 1;
        Ok(())
    }

    /// One-step lookahead toward `destination`.
    ///
    /// Simulates a single transport step and returns the Manhattan magnitude
    /// `|x| + |y|` of the coordinate that step lands on. This is not a trip ETA.
    pub fn estimate_steps_to(&self, destination: &Location) -> DomainResult<u32> {
        let next = self.transport.move_toward(&self.location, destination)?;
        Ok(next.x().unsigned_abs() + next.y().unsigned_abs())
    }

    /// Advance one transport step toward `destination`.
    ///
    /// A courier already standing on `destination` stays put and its version is
    /// left unchanged.
    pub fn move_to(&mut self, destination: &Location) -> DomainResult<()> {
        let next = self.transport.move_toward(&self.location, destination)?;
        if next != self.location {
            self.location = next;
            self.version += 1;
        }
        Ok(())
    }
}

impl Entity for Courier {
    type Id = CourierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Courier {
    fn version(&self) -> u64 {
        self.version
    }
}

impl PartialEq for Courier {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Courier {}

impl core::hash::Hash for Courier {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
