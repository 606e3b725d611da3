//! Shared-kernel grid coordinate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Immutable position on the fixed 10×10 delivery grid.
///
/// Both coordinates always lie in `[Location::MIN, Location::MAX]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct Location {
    x: i32,
    y: i32,
}

/// Unchecked wire shape; every deserialized location goes through [`Location::new`].
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
struct RawLocation {
    x: i32,
    y: i32,
}

impl Location {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    pub fn new(x: i32, y: i32) -> DomainResult<Self> {
        check_bounds(x)?;
        check_bounds(y)?;
        Ok(Self { x, y })
    }

    /// A location drawn uniformly from the grid using the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// A location drawn uniformly from the grid using `rng`.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random_range(Self::MIN..=Self::MAX),
            y: rng.random_range(Self::MIN..=Self::MAX),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Manhattan distance: `|x1 - x2| + |y1 - y2|`.
    pub fn distance_to(&self, other: &Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

fn check_bounds(value: i32) -> DomainResult<()> {
    if value < Location::MIN {
        return Err(DomainError::validation(format!(
            "Value must be greater than or equal to {}",
            Location::MIN
        )));
    }
    if value > Location::MAX {
        return Err(DomainError::validation(format!(
            "Value must be less than or equal to {}",
            Location::MAX
        )));
    }
    Ok(())
}

impl ValueObject for Location {}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TryFrom<RawLocation> for Location {
    type Error = DomainError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.x, raw.y)
    }
}

impl From<Location> for RawLocation {
    fn from(location: Location) -> Self {
        Self {
            x: location.x,
            y: location.y,
        }
    }
}
