use bytemuck::{Pod, Zeroable};
use cgmath::Vector3;

/// A single colored point. Laid out so a whole `PointSet` can be uploaded as one buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Point {
    pub loc: [f32; 3],
    pub color: [f32; 3],
}

impl Point {
    pub fn new(loc: [f32; 3], color: [f32; 3]) -> Point {
        Point { loc, color }
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::from(self.loc)
    }

    /// True if no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.loc.iter().chain(self.color.iter()).all(|c| c.is_finite())
    }
}

/// Ordered, fixed-length list of points. Point `i` of one stage morphs into point `i` of the next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn with_capacity(count: usize) -> PointSet {
        PointSet {
            points: Vec::with_capacity(count),
        }
    }

    pub fn from_points(points: Vec<Point>) -> PointSet {
        PointSet { points }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Raw bytes of the point list, 24 bytes per point
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_view_matches_layout() {
        let set = PointSet::from_points(vec![
            Point::new([1.0, 2.0, 3.0], [0.1, 0.2, 0.3]),
            Point::new([4.0, 5.0, 6.0], [0.4, 0.5, 0.6]),
        ]);
        let bytes = set.as_bytes();
        assert_eq!(bytes.len(), 2 * 24);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[5], 0.3);
        assert_eq!(floats[6], 4.0);
    }

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point::new([0.0; 3], [1.0; 3]).is_finite());
        assert!(!Point::new([f32::NAN, 0.0, 0.0], [1.0; 3]).is_finite());
        assert!(!Point::new([0.0; 3], [f32::INFINITY, 0.0, 0.0]).is_finite());
    }
}
