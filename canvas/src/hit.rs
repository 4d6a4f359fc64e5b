//! Hit-testing against polygon vertices.
//!
//! Lookups are first-match: polygons are scanned in creation order and
//! vertices in insertion order, and the first vertex within the proximity
//! threshold wins even if a later one is closer. Interaction behavior
//! (which vertex a press grabs, whether a click is swallowed) depends on
//! this order.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::polygon::{PolygonSet, VertexRef};

/// Which kind of vertex was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The first vertex of a polygon that is still open; clicking it closes.
    OpenStart,
    /// Any other vertex.
    Vertex,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: VertexRef,
    pub part: HitPart,
}

/// The first vertex, in iteration order, within the proximity threshold of `pointer`.
#[must_use]
pub fn find_nearest_vertex(pointer: Point, set: &PolygonSet) -> Option<VertexRef> {
    set.iter().enumerate().find_map(|(pi, polygon)| {
        polygon
            .vertices()
            .iter()
            .position(|v| pointer.is_near(*v))
            .map(|vi| VertexRef::new(pi, vi))
    })
}

/// Like [`find_nearest_vertex`], but also classifies the vertex that was hit.
#[must_use]
pub fn hit_test(pointer: Point, set: &PolygonSet) -> Option<Hit> {
    let target = find_nearest_vertex(pointer, set)?;
    let open = set.get(target.polygon).is_some_and(|p| !p.is_closed());
    let part = if target.is_first() && open {
        HitPart::OpenStart
    } else {
        HitPart::Vertex
    };
    Some(Hit { target, part })
}
