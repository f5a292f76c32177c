//! Collision detection and response for axis-aligned rectangles
//!
//! Single-pass, single-axis correction: for each overlapping pair the mover
//! is displaced along the axis of minimum penetration and the matching
//! velocity component is zeroed. Simultaneous multi-object penetration can
//! leave residual overlap for one frame; the next pass picks it up.

use glam::Vec2;

use super::rect::Rect;

/// Axis the resolver corrected along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAxis {
    Horizontal,
    Vertical,
}

/// Push a mover out of `obstacle` and zero the velocity component on the
/// resolved axis.
///
/// `local` is the mover's object-local collider; the absolute rectangle is
/// formed from `position`. Returns the resolved axis, or `None` when the
/// rectangles do not overlap.
///
/// An exact overlap tie (`w == h`) falls through to the vertical branch.
/// Inherited tie-break, kept as-is.
pub fn resolve_against(
    position: &mut Vec2,
    velocity: &mut Vec2,
    local: &Rect,
    obstacle: &Rect,
) -> Option<ResolvedAxis> {
    let abs = local.translated(*position);
    let overlap = abs.intersection(obstacle)?;

    if overlap.w < overlap.h {
        // Push out horizontally, against the direction of travel
        if velocity.x > 0.0 {
            position.x -= overlap.w;
        } else {
            position.x += overlap.w;
        }
        velocity.x = 0.0;
        Some(ResolvedAxis::Horizontal)
    } else {
        if velocity.y > 0.0 {
            position.y -= overlap.h;
        } else {
            position.y += overlap.h;
        }
        velocity.y = 0.0;
        Some(ResolvedAxis::Vertical)
    }
}

/// The thin probe rectangle used to detect standing support: the collider's
/// width, height 1, flush with the collider's bottom edge.
#[inline]
pub fn sensor_rect(collider_abs: &Rect) -> Rect {
    Rect::new(collider_abs.x, collider_abs.bottom(), collider_abs.w, 1.0)
}

/// Whether the ground probe under `collider_abs` overlaps any obstacle.
pub fn ground_sensor<'a, I>(collider_abs: &Rect, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    let probe = sensor_rect(collider_abs);
    obstacles.into_iter().any(|rect| probe.intersects(rect))
}
