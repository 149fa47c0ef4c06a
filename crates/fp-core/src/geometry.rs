//! Shape geometry: centroid, bounding box, drawable path, translation.
//!
//! All functions are pure and work on any `Shape` value. Bounding boxes are
//! deliberately conservative approximations for curves and arcs (control-point
//! hull and radius-expanded endpoints) and ignore a rectangle's own rotation.

use crate::model::{Bounds, PlacedFurniture, Point, Shape, SweepFlag};
use std::fmt::Write as _;

// ─── Centroid & bounds ───────────────────────────────────────────────────

/// The point a shape is dragged and rotated by.
///
/// Polygon: mean of the vertices (not the area centroid).
/// Curve and arc: midpoint of the endpoints.
/// Rectangle: center of the unrotated box.
pub fn centroid(shape: &Shape) -> Point {
    match shape {
        Shape::Polygon { points } => {
            let n = points.len().max(1) as f64;
            let (sx, sy) = points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            Point::new(sx / n, sy / n)
        }
        Shape::Curve { start, end, .. } | Shape::Arc { start, end, .. } => start.midpoint(*end),
        Shape::Rectangle {
            x,
            y,
            width,
            height,
            ..
        } => Point::new(x + width / 2.0, y + height / 2.0),
    }
}

/// Axis-aligned bounding box used for collision and boundary checks.
pub fn bounding_box(shape: &Shape) -> Bounds {
    match shape {
        Shape::Polygon { points } => Bounds::from_points(points.iter().copied()).unwrap_or_default(),
        Shape::Curve {
            start,
            end,
            control1,
            control2,
        } => Bounds::from_points([*start, *end, *control1, *control2]).unwrap_or_default(),
        Shape::Arc {
            start, end, radius, ..
        } => {
            let r = radius.abs();
            let min_x = start.x.min(end.x) - r;
            let min_y = start.y.min(end.y) - r;
            let max_x = start.x.max(end.x) + r;
            let max_y = start.y.max(end.y) + r;
            Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
        }
        Shape::Rectangle {
            x,
            y,
            width,
            height,
            ..
        } => Bounds::new(*x, *y, *width, *height),
    }
}

// ─── Translation ─────────────────────────────────────────────────────────

/// Move every coordinate of a shape by `(dx, dy)`.
/// Sizes, radius, sweep and rectangle rotation are unchanged.
pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Shape {
    match shape {
        Shape::Polygon { points } => Shape::Polygon {
            points: points.iter().map(|p| p.offset(dx, dy)).collect(),
        },
        Shape::Curve {
            start,
            end,
            control1,
            control2,
        } => Shape::Curve {
            start: start.offset(dx, dy),
            end: end.offset(dx, dy),
            control1: control1.offset(dx, dy),
            control2: control2.offset(dx, dy),
        },
        Shape::Arc {
            start,
            end,
            radius,
            sweep,
        } => Shape::Arc {
            start: start.offset(dx, dy),
            end: end.offset(dx, dy),
            radius: *radius,
            sweep: *sweep,
        },
        Shape::Rectangle {
            x,
            y,
            width,
            height,
            rotation,
        } => Shape::Rectangle {
            x: x + dx,
            y: y + dy,
            width: *width,
            height: *height,
            rotation: *rotation,
        },
    }
}

/// Add `step` degrees to a rotation and wrap into `[0, 360)`.
pub fn wrap_rotation(current: f64, step: f64) -> f64 {
    (current + step).rem_euclid(360.0)
}

// ─── Drawable paths ──────────────────────────────────────────────────────

/// A single path segment in canvas space (SVG-like).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// control1, control2, end
    CubicTo(Point, Point, Point),
    /// Circular arc to `end`: radius, sweep, end. Always the small arc.
    ArcTo {
        radius: f64,
        sweep: SweepFlag,
        end: Point,
    },
    Close,
}

/// The segments that outline a shape, before any rotation.
pub fn path_segments(shape: &Shape) -> Vec<PathSegment> {
    match shape {
        Shape::Polygon { points } => {
            let mut segs = Vec::with_capacity(points.len() + 1);
            let mut iter = points.iter();
            if let Some(first) = iter.next() {
                segs.push(PathSegment::MoveTo(*first));
                segs.extend(iter.map(|p| PathSegment::LineTo(*p)));
                segs.push(PathSegment::Close);
            }
            segs
        }
        Shape::Curve {
            start,
            end,
            control1,
            control2,
        } => vec![
            PathSegment::MoveTo(*start),
            PathSegment::CubicTo(*control1, *control2, *end),
        ],
        Shape::Arc {
            start,
            end,
            radius,
            sweep,
        } => vec![
            PathSegment::MoveTo(*start),
            PathSegment::ArcTo {
                radius: *radius,
                sweep: *sweep,
                end: *end,
            },
        ],
        Shape::Rectangle {
            x,
            y,
            width,
            height,
            ..
        } => vec![
            PathSegment::MoveTo(Point::new(*x, *y)),
            PathSegment::LineTo(Point::new(x + width, *y)),
            PathSegment::LineTo(Point::new(x + width, y + height)),
            PathSegment::LineTo(Point::new(*x, y + height)),
            PathSegment::Close,
        ],
    }
}

/// Renderer-agnostic drawing instruction: SVG path data plus an SVG
/// transform list (empty when no rotation applies).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawablePath {
    pub path: String,
    pub transform: String,
}

/// Encode segments as SVG path data.
pub fn segments_to_svg(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match seg {
            PathSegment::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
            PathSegment::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
            PathSegment::CubicTo(c1, c2, e) => write!(
                out,
                "C {} {}, {} {}, {} {}",
                c1.x, c1.y, c2.x, c2.y, e.x, e.y
            ),
            PathSegment::ArcTo { radius, sweep, end } => write!(
                out,
                "A {radius} {radius} 0 0 {} {} {}",
                sweep.as_u8(),
                end.x,
                end.y
            ),
            PathSegment::Close => write!(out, "Z"),
        };
    }
    out
}

fn rotate_about(degrees: f64, center: Point) -> String {
    format!("rotate({degrees} {} {})", center.x, center.y)
}

/// Path data and the shape's own transform (a rectangle's built-in rotation).
pub fn to_drawable_path(shape: &Shape) -> DrawablePath {
    let path = segments_to_svg(&path_segments(shape));
    let transform = match shape {
        Shape::Rectangle { rotation, .. } if *rotation != 0.0 => {
            rotate_about(*rotation, centroid(shape))
        }
        _ => String::new(),
    };
    DrawablePath { path, transform }
}

/// Full transform list for a placed item: the applied rotation about the
/// current centroid, outside the shape's own transform.
pub fn placement_transform(placed: &PlacedFurniture) -> String {
    let own = to_drawable_path(&placed.coordinates).transform;
    if placed.rotation == 0.0 {
        return own;
    }
    let applied = rotate_about(placed.rotation, centroid(&placed.coordinates));
    if own.is_empty() {
        applied
    } else {
        format!("{applied} {own}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn square() -> Shape {
        Shape::Polygon {
            points: smallvec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        }
    }

    fn curve() -> Shape {
        Shape::Curve {
            start: Point::new(0.0, 0.0),
            end: Point::new(20.0, 0.0),
            control1: Point::new(5.0, -10.0),
            control2: Point::new(15.0, 12.0),
        }
    }

    fn arc() -> Shape {
        Shape::Arc {
            start: Point::new(10.0, 10.0),
            end: Point::new(30.0, 10.0),
            radius: 10.0,
            sweep: SweepFlag::Clockwise,
        }
    }

    #[test]
    fn centroid_of_rectangle_and_polygon() {
        assert_eq!(centroid(&Shape::rect(0.0, 0.0, 10.0, 20.0)), Point::new(5.0, 10.0));
        assert_eq!(centroid(&square()), Point::new(5.0, 5.0));
    }

    #[test]
    fn centroid_of_curve_and_arc_ignores_controls() {
        assert_eq!(centroid(&curve()), Point::new(10.0, 0.0));
        assert_eq!(centroid(&arc()), Point::new(20.0, 10.0));
    }

    #[test]
    fn polygon_bounding_box() {
        let tri = Shape::Polygon {
            points: smallvec![Point::new(2.0, 3.0), Point::new(8.0, 1.0), Point::new(5.0, 9.0)],
        };
        assert_eq!(bounding_box(&tri), Bounds::new(2.0, 1.0, 6.0, 8.0));
    }

    #[test]
    fn curve_bounding_box_uses_control_points() {
        assert_eq!(bounding_box(&curve()), Bounds::new(0.0, -10.0, 20.0, 22.0));
    }

    #[test]
    fn arc_bounding_box_expands_by_radius() {
        assert_eq!(bounding_box(&arc()), Bounds::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn rotated_rectangle_box_ignores_rotation() {
        let r = Shape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 10.0,
            rotation: 90.0,
        };
        assert_eq!(bounding_box(&r), Bounds::new(0.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn translate_roundtrip_all_variants() {
        let shapes = [
            Shape::Rectangle {
                x: 1.5,
                y: 2.25,
                width: 10.0,
                height: 4.0,
                rotation: 30.0,
            },
            square(),
            curve(),
            arc(),
        ];
        for shape in shapes {
            let back = translate(&translate(&shape, 13.7, -8.3), -13.7, 8.3);
            let (a, b) = (path_segments(&shape), path_segments(&back));
            assert_eq!(a.len(), b.len());
            for (sa, sb) in a.iter().zip(&b) {
                assert_segments_close(sa, sb);
            }
            assert_eq!(shape.kind_name(), back.kind_name());
        }
    }

    fn assert_points_close(a: &Point, b: &Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    fn assert_segments_close(a: &PathSegment, b: &PathSegment) {
        match (a, b) {
            (PathSegment::MoveTo(p), PathSegment::MoveTo(q))
            | (PathSegment::LineTo(p), PathSegment::LineTo(q)) => assert_points_close(p, q),
            (PathSegment::CubicTo(a1, a2, a3), PathSegment::CubicTo(b1, b2, b3)) => {
                assert_points_close(a1, b1);
                assert_points_close(a2, b2);
                assert_points_close(a3, b3);
            }
            (
                PathSegment::ArcTo {
                    radius: ra,
                    sweep: sa,
                    end: ea,
                },
                PathSegment::ArcTo {
                    radius: rb,
                    sweep: sb,
                    end: eb,
                },
            ) => {
                assert_eq!(ra, rb);
                assert_eq!(sa, sb);
                assert_points_close(ea, eb);
            }
            (PathSegment::Close, PathSegment::Close) => {}
            _ => panic!("segment kinds differ: {a:?} vs {b:?}"),
        }
    }

    #[test]
    fn translate_keeps_rectangle_rotation() {
        let r = Shape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 2.0,
            rotation: 45.0,
        };
        match translate(&r, 3.0, 4.0) {
            Shape::Rectangle { x, y, rotation, .. } => {
                assert_eq!((x, y, rotation), (3.0, 4.0, 45.0));
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn rotation_wraps_after_four_steps() {
        let mut r = 0.0;
        for _ in 0..4 {
            r = wrap_rotation(r, 90.0);
        }
        assert_eq!(r, 0.0);
        assert_eq!(wrap_rotation(270.0, 90.0), 0.0);
        assert_eq!(wrap_rotation(0.0, -90.0), 270.0);
    }

    #[test]
    fn drawable_paths() {
        let tri = Shape::Polygon {
            points: smallvec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 3.0)],
        };
        assert_eq!(
            to_drawable_path(&tri),
            DrawablePath {
                path: "M 0 0 L 4 0 L 2 3 Z".into(),
                transform: String::new(),
            }
        );
        assert_eq!(
            to_drawable_path(&curve()).path,
            "M 0 0 C 5 -10, 15 12, 20 0"
        );
        assert_eq!(to_drawable_path(&arc()).path, "M 10 10 A 10 10 0 0 1 30 10");

        let rect = Shape::Rectangle {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 10.0,
            rotation: 90.0,
        };
        assert_eq!(
            to_drawable_path(&rect),
            DrawablePath {
                path: "M 10 20 L 40 20 L 40 30 L 10 30 Z".into(),
                transform: "rotate(90 25 25)".into(),
            }
        );
        assert_eq!(to_drawable_path(&Shape::rect(0.0, 0.0, 1.0, 1.0)).transform, "");
    }

    #[test]
    fn placement_transform_composes_rotations() {
        let rect = Shape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            rotation: 45.0,
        };
        let mut placed = PlacedFurniture {
            furniture_id: "table".into(),
            label: "Table".into(),
            area: "dining".into(),
            coordinates: rect.clone(),
            original_coordinates: rect,
            rotation: 0.0,
        };
        assert_eq!(placement_transform(&placed), "rotate(45 5 5)");
        placed.rotation = 90.0;
        assert_eq!(placement_transform(&placed), "rotate(90 5 5) rotate(45 5 5)");
    }
}
