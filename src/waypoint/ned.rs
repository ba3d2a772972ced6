use crate::Meters;
use serde::Deserialize;
use serde::Serialize;

/// Position in the vehicle's local North-East-Down tangent frame.
/// Down grows toward the ground, so climbing makes `down` more negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Meters; 3]", into = "[Meters; 3]")]
pub struct Ned {
    pub north: Meters,
    pub east: Meters,
    pub down: Meters,
}

impl Ned {
    pub const fn new(north: Meters, east: Meters, down: Meters) -> Self {
        Self { north, east, down }
    }
    pub fn distance(&self, other: &Self) -> Meters {
        let dn = self.north - other.north;
        let de = self.east - other.east;
        let dd = self.down - other.down;
        (dn * dn + de * de + dd * dd).sqrt()
    }
    /// Point `fraction` of the way from `self` to `other`.
    pub fn lerp(&self, other: &Self, fraction: f64) -> Self {
        Self {
            north: self.north + (other.north - self.north) * fraction,
            east: self.east + (other.east - self.east) * fraction,
            down: self.down + (other.down - self.down) * fraction,
        }
    }
    pub fn offset(&self, north: Meters, east: Meters, down: Meters) -> Self {
        Self::new(self.north + north, self.east + east, self.down + down)
    }
}

impl From<[Meters; 3]> for Ned {
    fn from([north, east, down]: [Meters; 3]) -> Self {
        Self::new(north, east, down)
    }
}
impl From<Ned> for [Meters; 3] {
    fn from(ned: Ned) -> Self {
        [ned.north, ned.east, ned.down]
    }
}

impl std::fmt::Display for Ned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(N {:.2}, E {:.2}, D {:.2})", self.north, self.east, self.down)
    }
}
