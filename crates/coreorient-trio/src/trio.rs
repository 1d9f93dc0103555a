use coreorient_core::{GeometryError, PickedPoint, PlaneEquation};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Number of points that define a structural plane.
pub const TRIO_SIZE: usize = 3;

/// Picking progress of a trio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrioState {
    Empty,
    Building { points: usize },
    Complete,
}

/// Where a trio's depth came from; decides whether a reposition re-resolves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthSource {
    /// First trio of the session, waiting for the operator.
    #[default]
    Pending,
    /// Resolved from the plane's axis crossing.
    Resolved,
    /// Entered by hand; kept across repositions.
    Manual,
    /// Set when a validation trio was built; replaced by the resolved depth
    /// on the first reposition.
    Constructed,
}

impl DepthSource {
    /// Whether moving a point should re-run the axis depth.
    pub fn follows_plane(self) -> bool {
        matches!(self, DepthSource::Resolved | DepthSource::Constructed)
    }
}

/// Three picked points defining one structure, plus everything derived from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointTrio {
    pub id: u32,
    pub points: Vec<PickedPoint>,
    pub color: String,
    /// Axial depth in centimeters.
    pub depth: Option<f64>,
    #[serde(default)]
    pub depth_source: DepthSource,
    /// Plane through the three points, once complete and non-degenerate.
    pub plane: Option<PlaneEquation>,
    /// Geometry failure of the last recompute, if any.
    pub geometry_error: Option<GeometryError>,
    pub is_validation: bool,
    pub created_at: SystemTime,
}

impl PointTrio {
    pub(crate) fn new(id: u32, color: String, is_validation: bool) -> Self {
        Self {
            id,
            points: Vec::with_capacity(TRIO_SIZE),
            color,
            depth: None,
            depth_source: DepthSource::Pending,
            plane: None,
            geometry_error: None,
            is_validation,
            created_at: SystemTime::now(),
        }
    }

    pub fn state(&self) -> TrioState {
        match self.points.len() {
            0 => TrioState::Empty,
            n if n < TRIO_SIZE => TrioState::Building { points: n },
            _ => TrioState::Complete,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() == TRIO_SIZE
    }

    /// Depth in meters.
    pub fn depth_m(&self) -> Option<f64> {
        self.depth.map(|d| d / 100.0)
    }

    pub fn point(&self, point_id: u32) -> Option<&PickedPoint> {
        self.points.iter().find(|p| p.id == point_id)
    }
}

/// Plane snapshot for overlay rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrioPlane {
    pub trio_id: u32,
    pub equation: PlaneEquation,
    pub color: String,
    pub visible: bool,
    pub is_validation: bool,
    /// Where the plane meets the cylinder wall, clamped into the section.
    pub outline: Vec<Point3<f64>>,
}

/// Result of a successful [`crate::TrioManager::add_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointAdded {
    pub trio_id: u32,
    pub point_id: u32,
    /// True when this point sealed the trio into the trio list.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_tracks_point_count() {
        let mut trio = PointTrio::new(7, "#fff".into(), false);
        assert_eq!(trio.state(), TrioState::Empty);
        for (i, expected) in [
            TrioState::Building { points: 1 },
            TrioState::Building { points: 2 },
            TrioState::Complete,
        ]
        .into_iter()
        .enumerate()
        {
            trio.points
                .push(PickedPoint::new(i as u32, Point3::new(0.0, 0.0, i as f64)));
            assert_eq!(trio.state(), expected);
        }
        assert!(trio.is_complete());
        assert!(trio.point(2).is_some());
        assert!(trio.point(5).is_none());
    }

    #[test]
    fn only_derived_depths_follow_the_plane() {
        assert!(DepthSource::Resolved.follows_plane());
        assert!(DepthSource::Constructed.follows_plane());
        assert!(!DepthSource::Manual.follows_plane());
        assert!(!DepthSource::Pending.follows_plane());
    }

    #[test]
    fn depth_is_reported_in_meters() {
        let mut trio = PointTrio::new(0, "#fff".into(), false);
        assert_eq!(trio.depth_m(), None);
        trio.depth = Some(1250.0);
        assert_eq!(trio.depth_m(), Some(12.5));
    }
}
