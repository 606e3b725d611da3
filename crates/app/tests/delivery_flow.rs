use dispatch_app::{
    AssignOrder, CreateOrder, DeliveryEvent, DispatchError, DispatchService, RegisterCourier,
};
use dispatch_core::{DomainError, Location, OrderId};
use dispatch_delivery::{CourierStatus, OrderStatus};
use proptest::prelude::*;
use serde_json::json;

fn loc(x: i32, y: i32) -> Location {
    Location::new(x, y).unwrap()
}

#[test]
fn full_delivery_round_trip_restores_free_courier() {
    let svc = DispatchService::in_memory();
    let courier = svc
        .register_courier(RegisterCourier::new("John", "Car", 2, loc(1, 1)))
        .unwrap();
    let courier_id = courier.id_typed();
    let order_id = OrderId::new();
    svc.create_order(CreateOrder::new(order_id, loc(5, 5))).unwrap();

    svc.assign(AssignOrder::new(order_id, courier_id)).unwrap();
    let busy = svc.courier(courier_id).unwrap().unwrap();
    assert_eq!(busy.status(), CourierStatus::Busy);
    assert_eq!(busy.order_id(), Some(order_id));

    // (1,1) -> (3,1) -> (5,1) -> (5,3) -> (5,5)
    let path: Vec<_> = (0..4).map(|_| svc.advance(courier_id).unwrap()).collect();
    assert_eq!(path, vec![loc(3, 1), loc(5, 1), loc(5, 3), loc(5, 5)]);

    svc.complete(courier_id).unwrap();

    let done = svc.courier(courier_id).unwrap().unwrap();
    assert_eq!(done.status(), CourierStatus::Free);
    assert_eq!(done.order_id(), None);
    assert_eq!(done.location(), loc(5, 5));

    let order = svc.order(order_id).unwrap().unwrap();
    assert_eq!(order.status(), OrderStatus::Completed);
    assert_eq!(order.courier_id(), Some(courier_id));

    let types: Vec<_> = svc.journal().iter().map(DeliveryEvent::event_type).collect();
    assert_eq!(
        types,
        vec![
            "delivery.order.assigned",
            "delivery.courier.moved",
            "delivery.courier.moved",
            "delivery.courier.moved",
            "delivery.courier.moved",
            "delivery.order.completed",
        ]
    );
}

#[test]
fn completed_order_cannot_be_reassigned() {
    let svc = DispatchService::in_memory();
    let courier = svc
        .register_courier(RegisterCourier::new("John", "Car", 2, loc(3, 3)))
        .unwrap();
    let order_id = OrderId::new();
    svc.create_order(CreateOrder::new(order_id, loc(3, 3))).unwrap();
    svc.assign(AssignOrder::new(order_id, courier.id_typed())).unwrap();
    svc.complete(courier.id_typed()).unwrap();

    let err = svc
        .assign(AssignOrder::new(order_id, courier.id_typed()))
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::Domain(DomainError::validation(
            "To be assigned, the order must have the CREATED status"
        ))
    );
    assert_eq!(
        svc.courier(courier.id_typed()).unwrap().unwrap().status(),
        CourierStatus::Free
    );
}

#[test]
fn commands_deserialize_from_json_and_check_presence() {
    let svc = DispatchService::in_memory();

    let cmd: RegisterCourier = serde_json::from_value(json!({
        "name": "Jane",
        "transport_name": "Scooter",
        "transport_speed": 3,
        "location": {"x": 2, "y": 9}
    }))
    .unwrap();
    let courier = svc.register_courier(cmd).unwrap();
    assert_eq!(courier.transport().speed(), 3);
    assert_eq!(courier.location(), loc(2, 9));

    let cmd: RegisterCourier = serde_json::from_value(json!({
        "name": "Jane",
        "transport_name": "Scooter"
    }))
    .unwrap();
    match svc.register_courier(cmd).unwrap_err() {
        DispatchError::Domain(DomainError::InvalidArgument { field, reason }) => {
            assert_eq!(field, "location");
            assert_eq!(reason, "Location cannot be null");
        }
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }

    let cmd: AssignOrder = serde_json::from_value(json!({ "courier_id": courier.id_typed() })).unwrap();
    assert_eq!(
        svc.assign(cmd).unwrap_err(),
        DispatchError::Domain(DomainError::missing("order"))
    );
}

#[test]
fn missing_speed_in_json_fails_speed_validation() {
    let svc = DispatchService::in_memory();
    let cmd: RegisterCourier = serde_json::from_value(json!({
        "name": "Jane",
        "transport_name": "Scooter",
        "location": {"x": 2, "y": 9}
    }))
    .unwrap();

    assert_eq!(
        svc.register_courier(cmd).unwrap_err(),
        DispatchError::Domain(DomainError::validation("Speed must be between 1 and 3"))
    );
    assert!(svc.free_couriers().unwrap().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: any courier reaches any order by repeated advances, in at most
    /// ceil(distance / speed) moves, and can then complete it.
    #[test]
    fn advance_always_reaches_the_order(
        speed in 1i32..=3,
        sx in 1i32..=10, sy in 1i32..=10,
        ox in 1i32..=10, oy in 1i32..=10,
    ) {
        let svc = DispatchService::in_memory();
        let start = loc(sx, sy);
        let target = loc(ox, oy);
        let courier = svc
            .register_courier(RegisterCourier::new("John", "Bike", speed, start))
            .unwrap();
        let order_id = OrderId::new();
        svc.create_order(CreateOrder::new(order_id, target)).unwrap();
        svc.assign(AssignOrder::new(order_id, courier.id_typed())).unwrap();

        let budget = start.distance_to(&target).div_ceil(speed as u32);
        let mut position = start;
        for _ in 0..budget {
            position = svc.advance(courier.id_typed()).unwrap();
        }
        prop_assert_eq!(position, target);

        svc.complete(courier.id_typed()).unwrap();
        prop_assert_eq!(svc.order(order_id).unwrap().unwrap().status(), OrderStatus::Completed);
    }
}
