//! Polygon model: vertex sequences with an open/closed lifecycle, and the
//! ordered set of polygons owned by one annotation session.
//!
//! Polygons are addressed by their index in the owning [`PolygonSet`] and
//! vertices by their index in the polygon ([`VertexRef`]). Nothing outside
//! this module holds references into the set, so the editing engine can pin a
//! vertex for dragging across many events while the set keeps full ownership.
//!
//! A polygon only grows at its tail while open. Once closed its vertex count
//! is frozen; vertex positions remain editable in either state.

#[cfg(test)]
#[path = "polygon_test.rs"]
mod polygon_test;

use serde::Serialize;

use crate::consts::MIN_CLOSED_VERTICES;
use crate::geom::Point;

/// Address of one vertex inside a [`PolygonSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexRef {
    /// Index of the polygon in creation order.
    pub polygon: usize,
    /// Index of the vertex in insertion order.
    pub vertex: usize,
}

impl VertexRef {
    #[must_use]
    pub fn new(polygon: usize, vertex: usize) -> Self {
        Self { polygon, vertex }
    }

    /// Whether this is the first vertex of its polygon.
    #[must_use]
    pub fn is_first(self) -> bool {
        self.vertex == 0
    }
}

/// What [`Polygon::append_vertex`] did with the offered point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendOutcome {
    /// The point became the new last vertex.
    Appended,
    /// The point landed on the first vertex and the polygon closed instead.
    Closed,
    /// The polygon was already closed; nothing changed.
    Ignored,
}

/// An ordered vertex sequence. Edges run between consecutive vertices, plus
/// last-to-first once closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polygon {
    points: Vec<Point>,
    closed: bool,
}

impl Polygon {
    /// Create an empty, open polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a new vertex.
    ///
    /// Closed polygons ignore the point. When the polygon already has more
    /// than two vertices and `p` is near the first one, the polygon closes and
    /// `p` is discarded. Otherwise `p` is appended.
    pub fn append_vertex(&mut self, p: Point) -> AppendOutcome {
        if self.closed {
            return AppendOutcome::Ignored;
        }

        if self.points.len() >= MIN_CLOSED_VERTICES {
            if let Some(first) = self.first_vertex() {
                if first.is_near(p) {
                    self.closed = true;
                    return AppendOutcome::Closed;
                }
            }
        }

        self.points.push(p);
        AppendOutcome::Appended
    }

    /// Close the polygon if it has at least three vertices.
    ///
    /// Returns whether the polygon is closed afterwards.
    pub fn close(&mut self) -> bool {
        if self.points.len() >= MIN_CLOSED_VERTICES {
            self.closed = true;
        }
        self.closed
    }

    /// Reposition an existing vertex. Returns false for an out-of-range index.
    pub fn move_vertex(&mut self, index: usize, to: Point) -> bool {
        let Some(point) = self.points.get_mut(index) else {
            return false;
        };
        *point = to;
        true
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn first_vertex(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last_vertex(&self) -> Option<Point> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.points
    }
}

/// The polygons of one annotation session, in creation order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
}

impl PolygonSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a polygon and return its index.
    pub fn push(&mut self, polygon: Polygon) -> usize {
        self.polygons.push(polygon);
        self.polygons.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Polygon> {
        self.polygons.get_mut(index)
    }

    /// The most recently created polygon.
    #[must_use]
    pub fn last(&self) -> Option<&Polygon> {
        self.polygons.last()
    }

    /// Position of a vertex, if the reference is still valid.
    #[must_use]
    pub fn vertex(&self, at: VertexRef) -> Option<Point> {
        self.get(at.polygon).and_then(|p| p.vertex(at.vertex))
    }

    /// Reposition a vertex in place. Returns false if the reference is stale.
    pub fn move_vertex(&mut self, at: VertexRef, to: Point) -> bool {
        self.get_mut(at.polygon)
            .is_some_and(|p| p.move_vertex(at.vertex, to))
    }

    /// Remove every polygon.
    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total number of vertices across all polygons.
    #[must_use]
    pub fn vertex_total(&self) -> usize {
        self.polygons.iter().map(Polygon::vertex_count).sum()
    }
}
