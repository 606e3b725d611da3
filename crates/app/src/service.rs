//! Application service: the only place that touches both aggregates.
//!
//! Every operation loads what it needs by id, runs the domain transition on
//! local copies, and saves with `ExpectedVersion::Exact` so a concurrent writer
//! is detected instead of overwritten. If a transition or a save fails, neither
//! aggregate keeps a partial change.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use dispatch_core::{
    AggregateRoot, CourierId, DomainError, ExpectedVersion, IdGenerator, Location, OrderId,
    UuidV7Generator,
};
use dispatch_delivery::{Courier, Order, validate_name};
use dispatch_infra::{InMemoryRepository, Repository, RepositoryError};

use crate::commands::{AssignOrder, CreateOrder, RegisterCourier};
use crate::journal::{DeliveryEvent, Journal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A domain rule rejected the call.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} already exists")]
    Duplicate { kind: &'static str, id: String },

    /// Optimistic concurrency failure (stale aggregate version).
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    /// The repository could not serve the request.
    #[error("storage failure: {0}")]
    Store(String),
}

impl From<RepositoryError> for DispatchError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Concurrency(msg) => DispatchError::Concurrency(msg),
            RepositoryError::Unavailable(msg) => DispatchError::Store(msg),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Sequences create → assign → move* → complete over two repositories.
pub struct DispatchService<C, O> {
    couriers: C,
    orders: O,
    ids: Arc<dyn IdGenerator + Send + Sync>,
    journal: Journal,
}

impl DispatchService<Arc<InMemoryRepository<Courier>>, Arc<InMemoryRepository<Order>>> {
    /// Service backed by fresh in-memory repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
        )
    }
}

impl<C, O> DispatchService<C, O>
where
    C: Repository<Courier>,
    O: Repository<Order>,
{
    pub fn new(couriers: C, orders: O) -> Self {
        Self::with_id_generator(couriers, orders, Arc::new(UuidV7Generator))
    }

    pub fn with_id_generator(
        couriers: C,
        orders: O,
        ids: Arc<dyn IdGenerator + Send + Sync>,
    ) -> Self {
        Self {
            couriers,
            orders,
            ids,
            journal: Journal::new(),
        }
    }

    pub fn journal(&self) -> Vec<DeliveryEvent> {
        self.journal.events()
    }

    pub fn register_courier(&self, cmd: RegisterCourier) -> DispatchResult<Courier> {
        let name = cmd.name.unwrap_or_default();
        validate_name(&name)?;
        let location = cmd.location.ok_or_else(|| DomainError::missing("location"))?;
        let transport_name = cmd.transport_name.unwrap_or_default();

        let courier = Courier::new_with(
            self.ids.as_ref(),
            &name,
            &transport_name,
            cmd.transport_speed,
            location,
        )?;
        self.couriers.save(courier.clone(), ExpectedVersion::Exact(0))?;

        tracing::info!(
            courier_id = %courier.id_typed(),
            name = courier.name(),
            speed = courier.transport().speed(),
            location = %courier.location(),
            "courier registered"
        );
        Ok(courier)
    }

    pub fn create_order(&self, cmd: CreateOrder) -> DispatchResult<Order> {
        let order_id = cmd.order_id.ok_or_else(|| DomainError::missing("id"))?;
        let location = cmd.location.ok_or_else(|| DomainError::missing("location"))?;

        if self.orders.get(&order_id)?.is_some() {
            return Err(DispatchError::Duplicate {
                kind: "order",
                id: order_id.to_string(),
            });
        }

        let order = Order::new(order_id, location);
        self.orders.save(order.clone(), ExpectedVersion::Exact(0))?;

        tracing::info!(order_id = %order_id, location = %location, "order created");
        Ok(order)
    }

    /// Link an order and a courier. The order is checked first, then the courier.
    pub fn assign(&self, cmd: AssignOrder) -> DispatchResult<()> {
        let order_id = cmd.order_id.ok_or_else(|| DomainError::missing("order"))?;
        let courier_id = cmd.courier_id.ok_or_else(|| DomainError::missing("courier"))?;

        let mut order = self.load_order(order_id)?;
        let mut courier = self.load_courier(courier_id)?;
        let order_version = order.version();

        let snapshot = courier.clone();
        order.assign_to_courier(&courier)?;
        courier.assign_order(&order)?;

        self.save_pair(snapshot, courier, order, order_version)?;

        tracing::info!(order_id = %order_id, courier_id = %courier_id, "order assigned");
        self.journal.append(DeliveryEvent::OrderAssigned {
            order_id,
            courier_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Move a busy courier one transport step toward its order.
    pub fn advance(&self, courier_id: CourierId) -> DispatchResult<Location> {
        let mut courier = self.load_courier(courier_id)?;
        let order = self.assigned_order(&courier)?;
        let version = courier.version();
        let from = courier.location();

        courier.move_to(&order.location())?;
        let to = courier.location();
        if to == from {
            return Ok(to);
        }

        self.couriers.save(courier, ExpectedVersion::Exact(version))?;

        tracing::debug!(courier_id = %courier_id, from = %from, to = %to, "courier moved");
        self.journal.append(DeliveryEvent::CourierMoved {
            courier_id,
            from,
            to,
            occurred_at: Utc::now(),
        });
        Ok(to)
    }

    /// One-step lookahead of a busy courier toward its order.
    pub fn estimate_steps(&self, courier_id: CourierId) -> DispatchResult<u32> {
        let courier = self.load_courier(courier_id)?;
        let order = self.assigned_order(&courier)?;
        Ok(courier.estimate_steps_to(&order.location())?)
    }

    /// Finish a delivery: the courier must stand on the order's location.
    pub fn complete(&self, courier_id: CourierId) -> DispatchResult<()> {
        let mut courier = self.load_courier(courier_id)?;
        let mut order = self.assigned_order(&courier)?;

        if !courier.has_arrived_at(&order.location()) {
            return Err(DomainError::illegal_state(
                "Courier has not arrived at the order location",
            )
            .into());
        }

        let order_version = order.version();
        let snapshot = courier.clone();
        order.complete()?;
        courier.complete_order()?;

        let order_id = order.id_typed();
        self.save_pair(snapshot, courier, order, order_version)?;

        tracing::info!(order_id = %order_id, courier_id = %courier_id, "order completed");
        self.journal.append(DeliveryEvent::OrderCompleted {
            order_id,
            courier_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Move an order's delivery point. Allowed in every order status.
    pub fn relocate_order(&self, order_id: OrderId, location: Location) -> DispatchResult<()> {
        let mut order = self.load_order(order_id)?;
        let version = order.version();
        order.relocate(location);
        self.orders.save(order, ExpectedVersion::Exact(version))?;

        tracing::info!(order_id = %order_id, location = %location, "order relocated");
        Ok(())
    }

    pub fn courier(&self, courier_id: CourierId) -> DispatchResult<Option<Courier>> {
        Ok(self.couriers.get(&courier_id)?)
    }

    pub fn order(&self, order_id: OrderId) -> DispatchResult<Option<Order>> {
        Ok(self.orders.get(&order_id)?)
    }

    /// Free couriers, ordered by id.
    pub fn free_couriers(&self) -> DispatchResult<Vec<Courier>> {
        let mut couriers: Vec<_> = self
            .couriers
            .list()?
            .into_iter()
            .filter(Courier::is_free)
            .collect();
        couriers.sort_by_key(Courier::id_typed);
        Ok(couriers)
    }

    /// Busy couriers, ordered by id.
    pub fn busy_couriers(&self) -> DispatchResult<Vec<Courier>> {
        let mut couriers: Vec<_> = self
            .couriers
            .list()?
            .into_iter()
            .filter(|c| !c.is_free())
            .collect();
        couriers.sort_by_key(Courier::id_typed);
        Ok(couriers)
    }

    /// Orders still waiting for a courier, ordered by id.
    pub fn pending_orders(&self) -> DispatchResult<Vec<Order>> {
        let mut orders: Vec<_> = self
            .orders
            .list()?
            .into_iter()
            .filter(Order::is_pending)
            .collect();
        orders.sort_by_key(Order::id_typed);
        Ok(orders)
    }

    /// Store a courier and order changed by one transition.
    ///
    /// The courier goes first. If the order save then fails, the courier is
    /// written back to `snapshot` so neither aggregate keeps half a transition.
    fn save_pair(
        &self,
        snapshot: Courier,
        courier: Courier,
        order: Order,
        order_version: u64,
    ) -> DispatchResult<()> {
        let courier_id = courier.id_typed();
        let saved_version = courier.version();
        self.couriers
            .save(courier, ExpectedVersion::Exact(snapshot.version()))?;

        if let Err(err) = self.orders.save(order, ExpectedVersion::Exact(order_version)) {
            if let Err(rollback) = self
                .couriers
                .save(snapshot, ExpectedVersion::Exact(saved_version))
            {
                tracing::error!(
                    courier_id = %courier_id,
                    error = %rollback,
                    "courier rollback failed after order save error"
                );
            } else {
                tracing::warn!(
                    courier_id = %courier_id,
                    error = %err,
                    "order save failed; courier rolled back"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn load_courier(&self, courier_id: CourierId) -> DispatchResult<Courier> {
        self.couriers
            .get(&courier_id)?
            .ok_or_else(|| DispatchError::NotFound {
                kind: "courier",
                id: courier_id.to_string(),
            })
    }

    fn load_order(&self, order_id: OrderId) -> DispatchResult<Order> {
        self.orders
            .get(&order_id)?
            .ok_or_else(|| DispatchError::NotFound {
                kind: "order",
                id: order_id.to_string(),
            })
    }

    fn assigned_order(&self, courier: &Courier) -> DispatchResult<Order> {
        let order_id = courier
            .order_id()
            .ok_or_else(|| DomainError::illegal_state("Courier is not busy"))?;
        self.load_order(order_id)
    }
}
