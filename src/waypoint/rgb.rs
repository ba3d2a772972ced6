use serde::Deserialize;
use serde::Serialize;

/// Light color with channels in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// HSV to RGB by the 60° sextant piecewise conversion.
    /// Hue in degrees (wrapped into [0, 360)), saturation and value in [0, 1].
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        let c = value * saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new(r + m, g + m, b + m)
    }

    pub fn max(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
    /// 8-bit channels after clamping into [0, 1].
    pub fn bytes(&self) -> [u8; 3] {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}
impl From<Rgb> for [f64; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({:.2}, {:.2}, {:.2})", self.r, self.g, self.b)
    }
}
