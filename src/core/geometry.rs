use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// True when `other` lies entirely inside this box, edges inclusive.
    pub fn contains(&self, other: &Self) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Grow the box by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn containment_is_edge_inclusive() {
        let outer = BBox::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains(&BBox::new(0.0, 0.0, 100.0, 50.0)));
        assert!(outer.contains(&BBox::new(10.0, 5.0, 90.0, 45.0)));
        assert!(!outer.contains(&BBox::new(10.0, 5.0, 100.5, 45.0)));
    }

    #[test]
    fn inflate_grows_every_side() {
        let b = BBox::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(b.inflate(1.0), BBox::new(9.0, 9.0, 21.0, 21.0));
    }
}
