use std::collections::BTreeMap;

use ratatui::style::Color;

/// Axis-aligned rectangle in canvas units, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Builds a rectangle from two corners in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Bounds { left: x0.min(x1), top: y0.min(y1), right: x0.max(x1), bottom: y0.max(y1) }
    }

    pub fn point(x: f32, y: f32) -> Self {
        Bounds { left: x, top: y, right: x, bottom: y }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Bounds { left: self.left + dx, top: self.top + dy, right: self.right + dx, bottom: self.bottom + dy }
    }

    /// Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        interval_sec(self.left, self.right, other.left, other.right)
            && interval_sec(self.top, self.bottom, other.top, other.bottom)
    }
}

fn interval_sec(l1: f32, r1: f32, l2: f32, r2: f32) -> bool {
    !(r1 < l2 || l1 > r2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { bounds: Bounds, color: Color },
    Text { x: f32, y: f32, text: String, color: Color },
}

impl Shape {
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Rect { bounds, .. } => *bounds,
            Shape::Text { x, y, .. } => Bounds::point(*x, *y),
        }
    }
}

/// Drawing surface the simulation keeps its shapes on.
///
/// Operations on a handle that no longer exists are ignored.
pub trait Surface {
    fn create_rect(&mut self, bounds: Bounds, color: Color) -> ShapeId;
    fn create_text(&mut self, x: f32, y: f32, text: &str, color: Color) -> ShapeId;
    fn move_shape(&mut self, id: ShapeId, dx: f32, dy: f32);
    fn set_text(&mut self, id: ShapeId, text: &str);
    fn delete(&mut self, id: ShapeId);
    fn coords(&self, id: ShapeId) -> Option<Bounds>;
    /// Every shape intersecting `region`, in creation order.
    fn overlapping(&self, region: Bounds) -> Vec<ShapeId>;
}

/// In-memory surface, drawn by the canvas widget.
#[derive(Debug, Default)]
pub struct Canvas {
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u32,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&ShapeId, &Shape)> {
        self.shapes.iter()
    }

    #[cfg(test)]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }
}

impl Surface for Canvas {
    fn create_rect(&mut self, bounds: Bounds, color: Color) -> ShapeId {
        let bounds = Bounds::new(bounds.left, bounds.top, bounds.right, bounds.bottom);
        self.insert(Shape::Rect { bounds, color })
    }

    fn create_text(&mut self, x: f32, y: f32, text: &str, color: Color) -> ShapeId {
        self.insert(Shape::Text { x, y, text: text.to_string(), color })
    }

    fn move_shape(&mut self, id: ShapeId, dx: f32, dy: f32) {
        match self.shapes.get_mut(&id) {
            Some(Shape::Rect { bounds, .. }) => *bounds = bounds.translate(dx, dy),
            Some(Shape::Text { x, y, .. }) => {
                *x += dx;
                *y += dy;
            },
            None => {},
        }
    }

    fn set_text(&mut self, id: ShapeId, new_text: &str) {
        if let Some(Shape::Text { text, .. }) = self.shapes.get_mut(&id) {
            *text = new_text.to_string();
        }
    }

    fn delete(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    fn coords(&self, id: ShapeId) -> Option<Bounds> {
        self.shapes.get(&id).map(Shape::bounds)
    }

    fn overlapping(&self, region: Bounds) -> Vec<ShapeId> {
        self.shapes.iter().filter(|(_, shape)| shape.bounds().overlaps(&region)).map(|(id, _)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bounds_normalized() {
        let bounds = Bounds::new(50.0, 100.0, 0.0, 0.0);
        assert_eq!(bounds, Bounds { left: 0.0, top: 0.0, right: 50.0, bottom: 100.0 });
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Bounds::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!a.overlaps(&Bounds::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Bounds::new(0.0, 11.0, 10.0, 20.0)));
    }

    #[test]
    fn test_move_and_coords() {
        let mut canvas = Canvas::new();
        let id = canvas.create_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::Green);
        canvas.move_shape(id, -2.5, 4.0);
        assert_eq!(canvas.coords(id), Some(Bounds::new(-2.5, 4.0, 7.5, 14.0)));
    }

    #[test]
    fn test_delete_forgets_shape() {
        let mut canvas = Canvas::new();
        let id = canvas.create_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::Green);
        canvas.delete(id);
        assert_eq!(canvas.coords(id), None);
        assert!(canvas.is_empty());
        // Stale handles are ignored.
        canvas.move_shape(id, 1.0, 1.0);
        canvas.set_text(id, "x");
    }

    #[test]
    fn test_set_text() {
        let mut canvas = Canvas::new();
        let id = canvas.create_text(300.0, 200.0, "0", Color::White);
        canvas.set_text(id, "12");
        assert_eq!(
            canvas.get(id),
            Some(&Shape::Text { x: 300.0, y: 200.0, text: "12".to_string(), color: Color::White })
        );
    }

    #[test]
    fn test_overlapping_includes_query_shape() {
        let mut canvas = Canvas::new();
        let bird = canvas.create_rect(Bounds::new(50.0, 185.0, 80.0, 215.0), Color::Red);
        let pipe = canvas.create_rect(Bounds::new(70.0, 0.0, 120.0, 190.0), Color::Green);
        let far = canvas.create_rect(Bounds::new(300.0, 0.0, 350.0, 100.0), Color::Green);

        let region = canvas.coords(bird).unwrap();
        let hits = canvas.overlapping(region);
        assert_eq!(hits, vec![bird, pipe]);
        assert!(!hits.contains(&far));
    }
}
