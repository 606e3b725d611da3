use dispatch_core::{DomainError, DomainResult, Entity, Location, TransportId};

/// A courier's movement capability.
///
/// Speed is fixed for the lifetime of a transport; a courier that needs a
/// different speed gets a new transport.
#[derive(Debug, Clone)]
pub struct Transport {
    id: TransportId,
    name: String,
    speed: i32,
}

impl Transport {
    pub const MIN_SPEED: i32 = 1;
    pub const MAX_SPEED: i32 = 3;

    pub fn new(name: &str, speed: i32) -> DomainResult<Self> {
        Self::with_id(TransportId::new(), name, speed)
    }

    pub fn with_id(id: TransportId, name: &str, speed: i32) -> DomainResult<Self> {
        validate_name(name)?;
        check_speed(speed)?;

        Ok(Self {
            id,
            name: name.trim().to_string(),
            speed,
        })
    }

    pub fn id_typed(&self) -> TransportId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        validate_name(name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    /// One step of bounded movement from `current` toward `target`.
    ///
    /// The X axis is served first, up to `speed` cells; whatever budget is left
    /// goes to the Y axis. Neither axis overshoots the target.
    pub fn move_toward(&self, current: &Location, target: &Location) -> DomainResult<Location> {
        let dx = target.x() - current.x();
        let dy = target.y() - current.y();

        let move_x = dx.clamp(-self.speed, self.speed);
        let remaining = self.speed - move_x.abs();
        let move_y = dy.clamp(-remaining, remaining);

        Location::new(current.x() + move_x, current.y() + move_y)
    }
}

/// Name rule shared by couriers and transports: anything but blank.
pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Name cannot be null or empty"));
    }
    Ok(())
}

fn check_speed(speed: i32) -> DomainResult<()> {
    if !(Transport::MIN_SPEED..=Transport::MAX_SPEED).contains(&speed) {
        return Err(DomainError::validation("Speed must be between 1 and 3"));
    }
    Ok(())
}

impl Entity for Transport {
    type Id = TransportId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Transport {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Transport {}

impl core::hash::Hash for Transport {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn car() -> Transport {
        Transport::new("Car", 2).unwrap()
    }

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y).unwrap()
    }

    #[test]
    fn new_sets_fields() {
        let transport = car();
        assert_eq!(transport.name(), "Car");
        assert_eq!(transport.speed(), 2);
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", " ", "\t", "\n"] {
            let err = Transport::new(name, 2).unwrap_err();
            assert_eq!(err, DomainError::validation("Name cannot be null or empty"));
        }
    }

    #[test]
    fn out_of_range_speeds_are_rejected() {
        for speed in [0, -1, 4, 10] {
            let err = Transport::new("Car", speed).unwrap_err();
            assert_eq!(err, DomainError::validation("Speed must be between 1 and 3"));
        }
    }

    #[test]
    fn rename_trims_the_new_name() {
        let mut transport = car();
        transport.rename("  Bike ").unwrap();
        assert_eq!(transport.name(), "Bike");
    }

    #[test]
    fn rename_rejects_blank_and_keeps_old_name() {
        let mut transport = car();
        for name in ["", " ", "\t", "\n"] {
            let err = transport.rename(name).unwrap_err();
            assert_eq!(err, DomainError::validation("Name cannot be null or empty"));
        }
        assert_eq!(transport.name(), "Car");
    }

    #[test]
    fn move_within_budget_spends_remainder_on_y() {
        let next = car().move_toward(&loc(1, 1), &loc(2, 3)).unwrap();
        assert_eq!(next, loc(2, 2));
    }

    #[test]
    fn move_exhausts_x_before_y() {
        let next = car().move_toward(&loc(1, 1), &loc(5, 5)).unwrap();
        assert_eq!(next, loc(3, 1));
    }

    #[test]
    fn move_handles_negative_direction() {
        let fast = Transport::new("Scooter", 3).unwrap();
        let next = fast.move_toward(&loc(10, 10), &loc(9, 1)).unwrap();
        assert_eq!(next, loc(9, 8));
    }

    #[test]
    fn move_at_target_stays_put() {
        assert_eq!(car().move_toward(&loc(4, 4), &loc(4, 4)).unwrap(), loc(4, 4));
    }

    #[test]
    fn equality_is_by_id() {
        let id = TransportId::from_uuid(Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000));
        let a = Transport::with_id(id, "Car", 2).unwrap();
        let b = Transport::with_id(id, "Bike", 3).unwrap();
        assert_eq!(a, b);

        assert_ne!(car(), car());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: a step never covers more than `speed` cells and never
        /// overshoots the target on either axis.
        #[test]
        fn step_is_bounded_and_never_overshoots(
            speed in 1i32..=3,
            cx in 1i32..=10, cy in 1i32..=10,
            tx in 1i32..=10, ty in 1i32..=10,
        ) {
            let transport = Transport::new("Bike", speed).unwrap();
            let current = loc(cx, cy);
            let target = loc(tx, ty);
            let next = transport.move_toward(&current, &target).unwrap();

            prop_assert!(current.distance_to(&next) <= speed as u32);
            prop_assert!((next.x() - cx).abs() <= (tx - cx).abs());
            prop_assert!((next.y() - cy).abs() <= (ty - cy).abs());
            prop_assert!(next.distance_to(&target) <= current.distance_to(&target));
        }

        /// Property: the step is as long as possible (full speed or arrival).
        #[test]
        fn step_uses_full_budget_or_arrives(
            speed in 1i32..=3,
            cx in 1i32..=10, cy in 1i32..=10,
            tx in 1i32..=10, ty in 1i32..=10,
        ) {
            let transport = Transport::new("Bike", speed).unwrap();
            let current = loc(cx, cy);
            let target = loc(tx, ty);
            let next = transport.move_toward(&current, &target).unwrap();

            let travelled = current.distance_to(&next);
            prop_assert!(travelled == speed as u32 || next == target);
        }
    }
}
