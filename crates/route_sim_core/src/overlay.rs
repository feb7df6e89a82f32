//! Rendering-layer capability: one overlay slot per logical overlay kind.
//!
//! The simulation never touches map SDK objects. It only upserts or removes
//! overlays by [`OverlayKind`]; the front-end decides how to draw them.

use std::collections::BTreeMap;

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayKind {
    StartMarker,
    EndMarker,
    CurrentMarker,
    RoutePolyline,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::StartMarker,
        OverlayKind::EndMarker,
        OverlayKind::CurrentMarker,
        OverlayKind::RoutePolyline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverlayKind::StartMarker => "Start",
            OverlayKind::EndMarker => "End",
            OverlayKind::CurrentMarker => "Current position",
            OverlayKind::RoutePolyline => "Route",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker {
        position: Coordinate,
        label: &'static str,
    },
    Polyline {
        path: Vec<Coordinate>,
    },
}

impl Overlay {
    pub fn marker(kind: OverlayKind, position: Coordinate) -> Self {
        Overlay::Marker {
            position,
            label: kind.label(),
        }
    }
}

/// Sink for overlay updates.
pub trait MapOverlays {
    /// Create the overlay for `kind`, or replace the existing one.
    fn upsert(&mut self, kind: OverlayKind, overlay: Overlay);
    fn remove(&mut self, kind: OverlayKind);

    fn clear(&mut self) {
        for kind in OverlayKind::ALL {
            self.remove(kind);
        }
    }
}

/// In-memory overlay store, iterated in a stable draw order.
#[derive(Debug, Clone, Default)]
pub struct OverlaySet {
    overlays: BTreeMap<OverlayKind, Overlay>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: OverlayKind) -> Option<&Overlay> {
        self.overlays.get(&kind)
    }

    pub fn marker_position(&self, kind: OverlayKind) -> Option<Coordinate> {
        match self.overlays.get(&kind)? {
            Overlay::Marker { position, .. } => Some(*position),
            Overlay::Polyline { .. } => None,
        }
    }

    pub fn polyline(&self) -> Option<&[Coordinate]> {
        match self.overlays.get(&OverlayKind::RoutePolyline)? {
            Overlay::Polyline { path } => Some(path.as_slice()),
            Overlay::Marker { .. } => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayKind, &Overlay)> {
        self.overlays.iter().map(|(kind, overlay)| (*kind, overlay))
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl MapOverlays for OverlaySet {
    fn upsert(&mut self, kind: OverlayKind, overlay: Overlay) {
        self.overlays.insert(kind, overlay);
    }

    fn remove(&mut self, kind: OverlayKind) {
        self.overlays.remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_overlay() {
        let mut set = OverlaySet::new();
        let kind = OverlayKind::CurrentMarker;
        set.upsert(kind, Overlay::marker(kind, Coordinate::new(1.0, 2.0)));
        set.upsert(kind, Overlay::marker(kind, Coordinate::new(3.0, 4.0)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.marker_position(kind), Some(Coordinate::new(3.0, 4.0)));
    }

    #[test]
    fn clear_removes_every_kind() {
        let mut set = OverlaySet::new();
        set.upsert(
            OverlayKind::StartMarker,
            Overlay::marker(OverlayKind::StartMarker, Coordinate::new(1.0, 2.0)),
        );
        set.upsert(
            OverlayKind::RoutePolyline,
            Overlay::Polyline {
                path: vec![Coordinate::new(1.0, 2.0), Coordinate::new(1.5, 2.5)],
            },
        );
        set.clear();
        assert!(set.is_empty());
    }
}
