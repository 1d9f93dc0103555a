//! Point-picking session state.
//!
//! Every mutation runs to completion and recomputes the affected trio
//! explicitly before returning. Rejected operations leave the manager as it
//! was.

use crate::{
    DepthSource, PointAdded, PointTrio, TrioError, TrioManagerParams, TrioPlane, TRIO_SIZE,
};
use coreorient_core::{
    fit_picked_points, local_angles, plane_cylinder_outline, resolve_axis_depth,
    validation_points, BohReference, GeometryError, LocalAngles, PickedPoint, BOH_ANGLE_MAX,
    BOH_ANGLE_MIN,
};
use log::{debug, info, warn};
use nalgebra::Point3;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Groups picked points into trios and keeps their planes and depths current.
#[derive(Clone, Debug)]
pub struct TrioManager {
    params: TrioManagerParams,
    trios: Vec<PointTrio>,
    current: Option<PointTrio>,
    scene_captured: bool,
    show_validation: bool,
    next_trio_id: u32,
    next_point_id: u32,
    palette_cursor: usize,
}

impl Default for TrioManager {
    fn default() -> Self {
        Self::new(TrioManagerParams::default())
    }
}

impl TrioManager {
    pub fn new(params: TrioManagerParams) -> Self {
        Self {
            params,
            trios: Vec::new(),
            current: None,
            scene_captured: false,
            show_validation: true,
            next_trio_id: 0,
            next_point_id: 0,
            palette_cursor: 0,
        }
    }

    pub fn params(&self) -> &TrioManagerParams {
        &self.params
    }

    /// Picking is only allowed once the scene photo exists.
    pub fn set_scene_captured(&mut self, captured: bool) {
        self.scene_captured = captured;
    }

    pub fn scene_captured(&self) -> bool {
        self.scene_captured
    }

    /// Whether the first non-validation trio has its depth.
    ///
    /// `true` while no such trio has been sealed yet.
    pub fn first_trio_depth_supplied(&self) -> bool {
        self.first_normal_trio().is_none_or(|t| t.depth.is_some())
    }

    fn first_normal_trio(&self) -> Option<&PointTrio> {
        self.trios.iter().find(|t| !t.is_validation)
    }

    fn allocate_trio(&mut self, is_validation: bool) -> PointTrio {
        let color = self.params.color_for(self.palette_cursor);
        let trio = PointTrio::new(self.next_trio_id, color, is_validation);
        self.next_trio_id += 1;
        self.palette_cursor += 1;
        trio
    }

    /// Give back the id and color of a discarded in-progress trio when
    /// nothing was allocated after it.
    fn release_trio(&mut self, trio: &PointTrio) {
        if self.next_trio_id == trio.id + 1 {
            self.next_trio_id -= 1;
            self.palette_cursor = self.palette_cursor.saturating_sub(1);
        }
    }

    /// Append a picked point to the in-progress trio.
    ///
    /// The third point seals the trio: its plane is fitted and, for every
    /// trio but the first, its depth is resolved from the plane. Geometry
    /// failures are attached to the trio and do not reject the point.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn add_point(&mut self, position: Point3<f64>) -> Result<PointAdded, TrioError> {
        if !self.scene_captured {
            return Err(TrioError::SceneNotCaptured);
        }
        if position.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidNumericInput.into());
        }
        if !self.first_trio_depth_supplied() {
            return Err(TrioError::FirstTrioDepthMissing);
        }
        if self.current.is_none() && self.normal_trio_count() >= self.params.max_trios {
            return Err(TrioError::TrioLimitReached {
                max: self.params.max_trios,
            });
        }

        let mut trio = match self.current.take() {
            Some(trio) => trio,
            None => {
                let trio = self.allocate_trio(false);
                debug!("started trio {} ({})", trio.id, trio.color);
                trio
            }
        };

        let point_id = self.next_point_id;
        self.next_point_id += 1;
        trio.points.push(PickedPoint::new(point_id, position));
        let trio_id = trio.id;

        if trio.points.len() < TRIO_SIZE {
            self.current = Some(trio);
            return Ok(PointAdded {
                trio_id,
                point_id,
                completed: false,
            });
        }

        let is_first = self.first_normal_trio().is_none();
        if !is_first {
            trio.depth_source = DepthSource::Resolved;
        }
        recompute(&mut trio, !is_first);
        if is_first && trio.plane.is_some() {
            info!("trio {trio_id} complete; waiting for the first trio depth");
        } else {
            info!("trio {trio_id} complete, depth {:?} cm", trio.depth);
        }
        self.trios.push(trio);

        Ok(PointAdded {
            trio_id,
            point_id,
            completed: true,
        })
    }

    /// Undo the last point of the in-progress trio.
    ///
    /// A trio left without points is discarded.
    pub fn remove_last_point(&mut self) -> Option<PickedPoint> {
        let trio = self.current.as_mut()?;
        let point = trio.points.pop();
        if trio.points.is_empty() {
            if let Some(trio) = self.current.take() {
                debug!("discarded empty trio {}", trio.id);
                self.release_trio(&trio);
            }
        }
        point
    }

    /// Discard the in-progress trio, if any.
    pub fn cancel_current_trio(&mut self) -> Option<PointTrio> {
        let trio = self.current.take()?;
        debug!("cancelled trio {} with {} points", trio.id, trio.points.len());
        self.release_trio(&trio);
        Some(trio)
    }

    /// Move a point of a sealed trio and recompute that trio.
    ///
    /// Manually entered depths, and the first trio still waiting for one,
    /// are kept. Every other depth is re-resolved from the new plane,
    /// including the constructed depth of a validation trio.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn update_point_position(
        &mut self,
        trio_id: u32,
        point_id: u32,
        position: Point3<f64>,
    ) -> Result<(), TrioError> {
        if position.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidNumericInput.into());
        }
        let trio = self
            .trios
            .iter_mut()
            .find(|t| t.id == trio_id)
            .ok_or(TrioError::UnknownTrio { id: trio_id })?;
        let point = trio
            .points
            .iter_mut()
            .find(|p| p.id == point_id)
            .ok_or(TrioError::UnknownPoint { trio_id, point_id })?;

        point.position = position;
        let resolve_depth = trio.depth_source.follows_plane();
        if resolve_depth {
            trio.depth_source = DepthSource::Resolved;
        }
        recompute(trio, resolve_depth);
        debug!("trio {trio_id} point {point_id} moved, depth {:?} cm", trio.depth);
        Ok(())
    }

    /// Override a trio's depth (centimeters) within `[0, max_depth_cm]`.
    pub fn set_trio_depth(
        &mut self,
        trio_id: u32,
        depth_cm: f64,
        max_depth_cm: f64,
    ) -> Result<(), TrioError> {
        if !depth_cm.is_finite() || !max_depth_cm.is_finite() {
            return Err(GeometryError::InvalidNumericInput.into());
        }
        let trio = self
            .trios
            .iter_mut()
            .find(|t| t.id == trio_id)
            .ok_or(TrioError::UnknownTrio { id: trio_id })?;
        if !(0.0..=max_depth_cm).contains(&depth_cm) {
            return Err(TrioError::DepthOutOfRange {
                depth_cm,
                max_cm: max_depth_cm,
                max_m: max_depth_cm / 100.0,
            });
        }
        trio.depth = Some(depth_cm);
        trio.depth_source = DepthSource::Manual;
        info!("trio {trio_id} depth set to {depth_cm:.2} cm");
        Ok(())
    }

    /// Delete one sealed trio.
    pub fn remove_trio(&mut self, trio_id: u32) -> Result<PointTrio, TrioError> {
        let idx = self
            .trios
            .iter()
            .position(|t| t.id == trio_id)
            .ok_or(TrioError::UnknownTrio { id: trio_id })?;
        let trio = self.trios.remove(idx);
        info!("removed trio {trio_id}");
        Ok(trio)
    }

    /// Delete every trio, including the in-progress one.
    pub fn clear_all_trios(&mut self) {
        let count = self.trios.len();
        self.trios.clear();
        self.current = None;
        info!("cleared {count} trios");
    }

    /// Delete validation trios only.
    pub fn clear_validation_trios(&mut self) {
        let before = self.trios.len();
        self.trios.retain(|t| !t.is_validation);
        info!("cleared {} validation trios", before - self.trios.len());
    }

    /// Build a validation trio from known local angles.
    ///
    /// Three wall points at surface azimuths `0°`, `120°`, `240°` are placed
    /// on the plane with local dip `alpha` and azimuth `boh_angle + beta`
    /// crossing the axis at `depth_cm`, then clamped into the modelled
    /// section. Not gated by the scene flag or the first-trio depth.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn create_validation_trio(
        &mut self,
        alpha: f64,
        beta: f64,
        depth_cm: f64,
        boh_angle: f64,
    ) -> Result<u32, TrioError> {
        if !boh_angle.is_finite() {
            return Err(GeometryError::InvalidNumericInput.into());
        }
        if !(BOH_ANGLE_MIN..=BOH_ANGLE_MAX).contains(&boh_angle) {
            return Err(GeometryError::BohAngleOutOfRange { angle: boh_angle }.into());
        }
        if let Some(max) = self.params.max_validation_trios {
            if self.validation_trio_count() >= max {
                return Err(TrioError::ValidationTrioLimitReached { max });
            }
        }

        let geometry = self.params.geometry;
        let positions = validation_points(
            LocalAngles { alpha, beta },
            depth_cm,
            boh_angle,
            geometry.radius_cm,
        )?;

        let mut trio = self.allocate_trio(true);
        for position in positions {
            let z = geometry.clamp_axial(position.z);
            if z != position.z {
                warn!(
                    "validation trio {}: point z {:.3} cm clamped to {:.3} cm",
                    trio.id, position.z, z
                );
            }
            let point_id = self.next_point_id;
            self.next_point_id += 1;
            trio.points
                .push(PickedPoint::new(point_id, Point3::new(position.x, position.y, z)));
        }
        recompute(&mut trio, false);
        trio.depth = Some(depth_cm);
        trio.depth_source = DepthSource::Constructed;

        let id = trio.id;
        info!(
            "validation trio {id}: alpha {alpha:.2} beta {beta:.2} depth {depth_cm:.2} boh {boh_angle:.1}"
        );
        self.trios.push(trio);
        Ok(id)
    }

    /// Show or hide validation planes in [`TrioManager::planes`].
    pub fn set_validation_visible(&mut self, visible: bool) {
        self.show_validation = visible;
    }

    pub fn validation_visible(&self) -> bool {
        self.show_validation
    }

    /// All sealed trios in the order they were sealed.
    ///
    /// A validation trio built while a normal trio is being picked is listed
    /// before it even though its id is higher.
    pub fn trios(&self) -> &[PointTrio] {
        &self.trios
    }

    pub fn normal_trios(&self) -> impl Iterator<Item = &PointTrio> {
        self.trios.iter().filter(|t| !t.is_validation)
    }

    pub fn validation_trios(&self) -> impl Iterator<Item = &PointTrio> {
        self.trios.iter().filter(|t| t.is_validation)
    }

    pub fn normal_trio_count(&self) -> usize {
        self.normal_trios().count()
    }

    pub fn validation_trio_count(&self) -> usize {
        self.validation_trios().count()
    }

    pub fn current_trio(&self) -> Option<&PointTrio> {
        self.current.as_ref()
    }

    pub fn trio(&self, trio_id: u32) -> Option<&PointTrio> {
        self.trios.iter().find(|t| t.id == trio_id)
    }

    /// Plane snapshots of every sealed trio with a fitted plane.
    pub fn planes(&self) -> Vec<TrioPlane> {
        self.trios
            .iter()
            .filter_map(|trio| {
                let equation = trio.plane?;
                Some(TrioPlane {
                    trio_id: trio.id,
                    equation,
                    color: trio.color.clone(),
                    visible: !trio.is_validation || self.show_validation,
                    is_validation: trio.is_validation,
                    outline: plane_cylinder_outline(
                        &equation,
                        &self.params.geometry,
                        self.params.outline_samples,
                    ),
                })
            })
            .collect()
    }

    /// Local angles of a sealed trio, measured against the BOH line that
    /// applies at its depth.
    pub fn local_angles(
        &self,
        trio_id: u32,
        boh: &BohReference,
    ) -> Result<LocalAngles, TrioError> {
        let trio = self
            .trio(trio_id)
            .ok_or(TrioError::UnknownTrio { id: trio_id })?;
        let plane = trio.plane.ok_or(TrioError::NoPlane { id: trio_id })?;
        let depth = trio.depth.ok_or(TrioError::NoDepth { id: trio_id })?;
        Ok(local_angles(&plane.normal, boh.angle_for_depth(depth))?)
    }
}

/// Refit the plane of a sealed trio and, if requested, its axis depth.
fn recompute(trio: &mut PointTrio, resolve_depth: bool) {
    trio.geometry_error = None;
    if resolve_depth {
        trio.depth = None;
    }
    match fit_picked_points(&trio.points) {
        Ok(plane) => {
            trio.plane = Some(plane);
            if resolve_depth {
                match resolve_axis_depth(&plane) {
                    Ok(depth) => trio.depth = Some(depth),
                    Err(err) => trio.geometry_error = Some(err),
                }
            }
        }
        Err(err) => {
            trio.plane = None;
            trio.geometry_error = Some(err);
        }
    }
    if let Some(err) = trio.geometry_error {
        warn!("trio {}: {err}", trio.id);
    }
}
