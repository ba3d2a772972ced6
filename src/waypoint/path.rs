use super::*;
use std::collections::VecDeque;

/// Ordered FIFO of waypoints.
/// Once handed to the executor, waypoints are discarded as they are dequeued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path(VecDeque<Waypoint>);

impl Path {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, waypoint: Waypoint) {
        self.0.push_back(waypoint);
    }
    pub fn pop(&mut self) -> Option<Waypoint> {
        self.0.pop_front()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.0.iter()
    }
    /// Sum of straight-line legs between consecutive waypoints.
    pub fn length(&self) -> crate::Meters {
        self.0
            .iter()
            .zip(self.0.iter().skip(1))
            .map(|(a, b)| a.position().distance(&b.position()))
            .sum()
    }
    /// Sum of all dwell times.
    pub fn dwell(&self) -> crate::Seconds {
        self.0.iter().map(Waypoint::hold_time).sum()
    }
}

impl From<Vec<Waypoint>> for Path {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self(VecDeque::from(waypoints))
    }
}
impl From<Path> for Vec<Waypoint> {
    fn from(path: Path) -> Self {
        Vec::from(path.0)
    }
}
impl FromIterator<Waypoint> for Path {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl IntoIterator for Path {
    type Item = Waypoint;
    type IntoIter = std::collections::vec_deque::IntoIter<Waypoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(north: f64) -> Waypoint {
        Waypoint::new(Ned::new(north, 0.0, 0.0), Rgb::WHITE, 1.0)
    }

    #[test]
    fn fifo_order() {
        let mut path = Path::from(vec![at(0.0), at(1.0), at(2.0)]);
        assert_eq!(path.pop().map(|w| w.position().north), Some(0.0));
        assert_eq!(path.pop().map(|w| w.position().north), Some(1.0));
        assert_eq!(path.len(), 1);
        assert_eq!(path.pop().map(|w| w.position().north), Some(2.0));
        assert!(path.pop().is_none());
        assert!(path.is_empty());
    }

    #[test]
    fn length_and_dwell() {
        let path = (0..4).map(|i| at(i as f64)).collect::<Path>();
        assert!((path.length() - 3.0).abs() < 1e-12);
        assert!((path.dwell() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_length() {
        assert_eq!(Path::new().length(), 0.0);
    }
}
