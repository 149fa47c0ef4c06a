//! kurbo geometry for placed shapes.
//!
//! Converts `Shape` outlines to `BezPath`s and builds the affine transform
//! that a renderer applies: the rectangle's own rotation first, then the
//! placement's applied rotation about the current centroid.

use fp_core::geometry::{PathSegment, centroid, path_segments};
use fp_core::model::{PlacedFurniture, Point, Shape, SweepFlag};
use kurbo::{Affine, BezPath, Rect, Shape as _, SvgArc, Vec2};

/// Flattening tolerance used when approximating arcs with cubics.
const ARC_TOLERANCE: f64 = 0.1;

fn kp(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

/// Outline of a shape in canvas space, without any rotation.
pub fn to_bez_path(shape: &Shape) -> BezPath {
    let mut path = BezPath::new();
    let mut current = kurbo::Point::ZERO;
    for seg in path_segments(shape) {
        match seg {
            PathSegment::MoveTo(p) => {
                current = kp(p);
                path.move_to(current);
            }
            PathSegment::LineTo(p) => {
                current = kp(p);
                path.line_to(current);
            }
            PathSegment::CubicTo(c1, c2, end) => {
                current = kp(end);
                path.curve_to(kp(c1), kp(c2), current);
            }
            PathSegment::ArcTo { radius, sweep, end } => {
                let to = kp(end);
                let svg_arc = SvgArc {
                    from: current,
                    to,
                    radii: Vec2::new(radius, radius),
                    x_rotation: 0.0,
                    large_arc: false,
                    sweep: sweep == SweepFlag::Clockwise,
                };
                match kurbo::Arc::from_svg_arc(&svg_arc) {
                    Some(arc) => path.extend(arc.append_iter(ARC_TOLERANCE)),
                    // Degenerate arc (zero radius or coincident endpoints).
                    None => path.line_to(to),
                }
                current = to;
            }
            PathSegment::Close => path.close_path(),
        }
    }
    path
}

/// Transform from the stored geometry to what is drawn on screen.
pub fn placement_affine(placed: &PlacedFurniture) -> Affine {
    let shape = &placed.coordinates;
    let own = match shape {
        Shape::Rectangle { rotation, .. } if *rotation != 0.0 => {
            Affine::rotate_about(rotation.to_radians(), kp(centroid(shape)))
        }
        _ => Affine::IDENTITY,
    };
    let applied = if placed.rotation != 0.0 {
        Affine::rotate_about(placed.rotation.to_radians(), kp(centroid(shape)))
    } else {
        Affine::IDENTITY
    };
    applied * own
}

/// Closed outline of a placement as drawn (both rotations applied).
/// Open curves and arcs are closed so the outline encloses the filled area.
pub fn placed_outline(placed: &PlacedFurniture) -> BezPath {
    let mut path = to_bez_path(&placed.coordinates);
    if matches!(placed.coordinates, Shape::Curve { .. } | Shape::Arc { .. }) {
        path.close_path();
    }
    placement_affine(placed) * path
}

/// Tight bounds of what is drawn, including rotation.
///
/// Collision checks intentionally keep using the unrotated
/// `fp_core::geometry::bounding_box`; this is only for display.
pub fn visual_bounds(placed: &PlacedFurniture) -> Rect {
    placed_outline(placed).bounding_box()
}
