//! Boundary commands accepted by [`DispatchService`](crate::DispatchService).
//!
//! Commands arrive from outside the process (JSON, CLI, ...), so their required
//! fields are optional here and presence is checked by the service.

use serde::{Deserialize, Serialize};

use dispatch_core::{CourierId, Location, OrderId};

/// Command: RegisterCourier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterCourier {
    pub name: Option<String>,
    pub transport_name: Option<String>,
    #[serde(default)]
    pub transport_speed: i32,
    pub location: Option<Location>,
}

/// Command: CreateOrder. The order id is always chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateOrder {
    pub order_id: Option<OrderId>,
    pub location: Option<Location>,
}

/// Command: AssignOrder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignOrder {
    pub order_id: Option<OrderId>,
    pub courier_id: Option<CourierId>,
}

impl RegisterCourier {
    pub fn new(name: &str, transport_name: &str, transport_speed: i32, location: Location) -> Self {
        Self {
            name: Some(name.to_string()),
            transport_name: Some(transport_name.to_string()),
            transport_speed,
            location: Some(location),
        }
    }
}

impl CreateOrder {
    pub fn new(order_id: OrderId, location: Location) -> Self {
        Self {
            order_id: Some(order_id),
            location: Some(location),
        }
    }
}

impl AssignOrder {
    pub fn new(order_id: OrderId, courier_id: CourierId) -> Self {
        Self {
            order_id: Some(order_id),
            courier_id: Some(courier_id),
        }
    }
}
