//! Persisted representations of the delivery aggregates.
//!
//! Records are the storage/wire shape: flat, serde-friendly, and lenient about
//! missing fields so that a damaged row is reported as a domain error instead of
//! a panic. Converting a record back into an aggregate re-checks every invariant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dispatch_core::{
    AggregateRoot, CourierId, DomainError, Location, OrderId, TransportId,
};
use dispatch_delivery::{Courier, CourierStatus, Order, OrderStatus, Transport};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRecord {
    pub id: Option<TransportId>,
    pub name: Option<String>,
    pub speed: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierRecord {
    pub id: Option<CourierId>,
    pub name: Option<String>,
    pub transport: Option<TransportRecord>,
    pub location: Option<Location>,
    pub status: CourierStatus,
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Option<OrderId>,
    pub location: Option<Location>,
    pub status: OrderStatus,
    pub courier_id: Option<CourierId>,
    #[serde(default)]
    pub version: u64,
}

impl From<&Transport> for TransportRecord {
    fn from(transport: &Transport) -> Self {
        Self {
            id: Some(transport.id_typed()),
            name: Some(transport.name().to_string()),
            speed: transport.speed(),
        }
    }
}

impl TryFrom<TransportRecord> for Transport {
    type Error = DomainError;

    fn try_from(record: TransportRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or_else(|| DomainError::missing("id"))?;
        let name = record.name.unwrap_or_default();
        Transport::with_id(id, &name, record.speed)
    }
}

impl From<&Courier> for CourierRecord {
    fn from(courier: &Courier) -> Self {
        Self {
            id: Some(courier.id_typed()),
            name: Some(courier.name().to_string()),
            transport: Some(TransportRecord::from(courier.transport())),
            location: Some(courier.location()),
            status: courier.status(),
            order_id: courier.order_id(),
            version: courier.version(),
        }
    }
}

impl TryFrom<CourierRecord> for Courier {
    type Error = DomainError;

    fn try_from(record: CourierRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or_else(|| DomainError::missing("id"))?;
        let name = record.name.unwrap_or_default();
        let transport = Transport::try_from(
            record
                .transport
                .ok_or_else(|| DomainError::missing("transport"))?,
        )?;
        let location = record.location.ok_or_else(|| DomainError::missing("location"))?;

        match (record.status, record.order_id) {
            (CourierStatus::Busy, None) => return Err(DomainError::missing("order")),
            (CourierStatus::Free, Some(_)) => {
                return Err(DomainError::validation(
                    "A free courier cannot hold an order",
                ));
            }
            _ => {}
        }

        Courier::restore(id, &name, transport, location, record.order_id, record.version)
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id_typed()),
            location: Some(order.location()),
            status: order.status(),
            courier_id: order.courier_id(),
            version: order.version(),
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = DomainError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or_else(|| DomainError::missing("id"))?;
        let location = record.location.ok_or_else(|| DomainError::missing("location"))?;
        Order::restore(id, location, record.status, record.courier_id, record.version)
    }
}

pub fn courier_to_json(courier: &Courier) -> Result<String, RecordError> {
    Ok(serde_json::to_string(&CourierRecord::from(courier))?)
}

pub fn courier_from_json(json: &str) -> Result<Courier, RecordError> {
    let record: CourierRecord = serde_json::from_str(json)?;
    Ok(Courier::try_from(record)?)
}

pub fn order_to_json(order: &Order) -> Result<String, RecordError> {
    Ok(serde_json::to_string(&OrderRecord::from(order))?)
}

pub fn order_from_json(json: &str) -> Result<Order, RecordError> {
    let record: OrderRecord = serde_json::from_str(json)?;
    Ok(Order::try_from(record)?)
}
