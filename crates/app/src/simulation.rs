//! Grid simulator driving [`DispatchService`] tick by tick.
//!
//! Each tick hands pending orders to the nearest free courier (ties broken by
//! courier id), then either completes or advances every busy courier. This is a
//! demo policy for exercising the service, not an assignment optimizer.

use rand::Rng;
use serde::Serialize;

use dispatch_core::{Location, OrderId};
use dispatch_delivery::{Courier, Order};
use dispatch_infra::Repository;

use crate::commands::{AssignOrder, CreateOrder, RegisterCourier};
use crate::config::SimConfig;
use crate::service::{DispatchResult, DispatchService};

const FLEET: [(&str, i32); 3] = [("Bicycle", 1), ("Scooter", 2), ("Car", 3)];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub ticks: usize,
    pub assigned: usize,
    pub moves: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn run_simulation<C, O, R>(
    service: &DispatchService<C, O>,
    config: &SimConfig,
    rng: &mut R,
) -> DispatchResult<SimulationReport>
where
    C: Repository<Courier>,
    O: Repository<Order>,
    R: Rng + ?Sized,
{
    for i in 0..config.couriers {
        let (transport, speed) = FLEET[i % FLEET.len()];
        service.register_courier(RegisterCourier::new(
            &format!("courier-{}", i + 1),
            transport,
            speed,
            Location::random_with(rng),
        ))?;
    }
    for _ in 0..config.orders {
        service.create_order(CreateOrder::new(OrderId::new(), Location::random_with(rng)))?;
    }

    let mut report = SimulationReport::default();

    while report.ticks < config.max_steps {
        report.assigned += dispatch_pending(service)?;

        let busy = service.busy_couriers()?;
        if busy.is_empty() && service.pending_orders()?.is_empty() {
            break;
        }

        for courier in busy {
            let Some(order_id) = courier.order_id() else {
                continue;
            };
            let Some(order) = service.order(order_id)? else {
                continue;
            };

            if courier.has_arrived_at(&order.location()) {
                service.complete(courier.id_typed())?;
                report.completed += 1;
            } else {
                service.advance(courier.id_typed())?;
                report.moves += 1;
            }
        }

        report.ticks += 1;
        tracing::debug!(tick = report.ticks, completed = report.completed, "tick finished");
    }

    report.pending = service.pending_orders()?.len();
    Ok(report)
}

/// Pair pending orders with the nearest free couriers. Returns how many were assigned.
fn dispatch_pending<C, O>(service: &DispatchService<C, O>) -> DispatchResult<usize>
where
    C: Repository<Courier>,
    O: Repository<Order>,
{
    let mut free = service.free_couriers()?;
    let mut assigned = 0;

    for order in service.pending_orders()? {
        let nearest = free
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| (c.location().distance_to(&order.location()), c.id_typed()))
            .map(|(idx, _)| idx);
        let Some(idx) = nearest else {
            break;
        };

        let courier = free.swap_remove(idx);
        service.assign(AssignOrder::new(order.id_typed(), courier.id_typed()))?;
        assigned += 1;
    }

    Ok(assigned)
}
