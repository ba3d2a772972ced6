use crate::waypoint::Rgb;

/// Index of the horizontal axis (maps to north).
pub const HORIZONTAL: usize = 0;
/// Index of the vertical axis, up positive (maps to up, i.e. negative down).
pub const VERTICAL: usize = 1;
/// Index of the depth axis, negative and more negative farther (maps to east).
pub const DEPTH: usize = 2;

/// Raw point-cloud sample. Identity is its position in the cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub xyz: [f64; 3],
    pub rgb: Rgb,
}

impl Point {
    pub fn new(xyz: [f64; 3], rgb: Rgb) -> Self {
        Self { xyz, rgb }
    }
    pub fn x(&self) -> f64 {
        self.xyz[HORIZONTAL]
    }
    pub fn y(&self) -> f64 {
        self.xyz[VERTICAL]
    }
    pub fn z(&self) -> f64 {
        self.xyz[DEPTH]
    }
}
