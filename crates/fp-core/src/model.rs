//! Core data model for floor-plan furniture placement.
//!
//! A floor plan is a fixed-size canvas. Furniture footprints are described
//! by one of four `Shape` variants in canvas space; every placed instance
//! lives in a `PlacementMap` under a generated `PlacementKey`.
//!
//! The JSON form of `Shape` keeps the structural encoding used by stored
//! layouts (array = polygon, `curve` key, `arc` key, else rectangle) while
//! the in-memory type is an explicit enum.

use crate::error::FloorPlanError;
use crate::id::PlacementKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Points & boxes ──────────────────────────────────────────────────────

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Signed overlap on the x axis (negative = gap between the boxes).
    pub fn overlap_x(&self, other: &Bounds) -> f64 {
        self.right().min(other.right()) - self.x.max(other.x)
    }

    /// Signed overlap on the y axis (negative = gap between the boxes).
    pub fn overlap_y(&self, other: &Bounds) -> f64 {
        self.bottom().min(other.bottom()) - self.y.max(other.y)
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Which of the two arcs of a given radius joins the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepFlag {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl SweepFlag {
    pub fn as_u8(self) -> u8 {
        match self {
            SweepFlag::CounterClockwise => 0,
            SweepFlag::Clockwise => 1,
        }
    }
}

impl TryFrom<u8> for SweepFlag {
    type Error = FloorPlanError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SweepFlag::CounterClockwise),
            1 => Ok(SweepFlag::Clockwise),
            other => Err(FloorPlanError::InvalidShape(format!(
                "sweep flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// A furniture footprint in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr", into = "ShapeRepr")]
pub enum Shape {
    /// Axis-aligned rectangle, optionally rotated (degrees) about its own center.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotation: f64,
    },
    /// Closed polygon; the path always returns to the first point.
    Polygon { points: SmallVec<[Point; 4]> },
    /// Cubic Bézier from `start` to `end`.
    Curve {
        start: Point,
        end: Point,
        control1: Point,
        control2: Point,
    },
    /// Circular arc of `radius` between the endpoints.
    Arc {
        start: Point,
        end: Point,
        radius: f64,
        sweep: SweepFlag,
    },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Rectangle {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Short lowercase name of the variant, for logs and the render layer.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
            Shape::Polygon { .. } => "polygon",
            Shape::Curve { .. } => "curve",
            Shape::Arc { .. } => "arc",
        }
    }
}

// Structural JSON encoding shared with stored layouts.

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ShapeRepr {
    Polygon(SmallVec<[Point; 4]>),
    Curve { curve: CurveRepr },
    Arc { arc: ArcRepr },
    Rectangle(RectRepr),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurveRepr {
    start: Point,
    end: Point,
    control1: Point,
    control2: Point,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArcRepr {
    start: Point,
    end: Point,
    radius: f64,
    #[serde(default)]
    sweep_flag: u8,
}

#[derive(Serialize, Deserialize)]
struct RectRepr {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    rotation: f64,
}

impl TryFrom<ShapeRepr> for Shape {
    type Error = FloorPlanError;

    fn try_from(repr: ShapeRepr) -> Result<Self, Self::Error> {
        Ok(match repr {
            ShapeRepr::Polygon(points) => {
                if points.len() < 3 {
                    return Err(FloorPlanError::InvalidShape(format!(
                        "polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                Shape::Polygon { points }
            }
            ShapeRepr::Curve { curve } => Shape::Curve {
                start: curve.start,
                end: curve.end,
                control1: curve.control1,
                control2: curve.control2,
            },
            ShapeRepr::Arc { arc } => Shape::Arc {
                start: arc.start,
                end: arc.end,
                radius: arc.radius,
                sweep: SweepFlag::try_from(arc.sweep_flag)?,
            },
            ShapeRepr::Rectangle(r) => Shape::Rectangle {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
                rotation: r.rotation,
            },
        })
    }
}

impl From<Shape> for ShapeRepr {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Polygon { points } => ShapeRepr::Polygon(points),
            Shape::Curve {
                start,
                end,
                control1,
                control2,
            } => ShapeRepr::Curve {
                curve: CurveRepr {
                    start,
                    end,
                    control1,
                    control2,
                },
            },
            Shape::Arc {
                start,
                end,
                radius,
                sweep,
            } => ShapeRepr::Arc {
                arc: ArcRepr {
                    start,
                    end,
                    radius,
                    sweep_flag: sweep.as_u8(),
                },
            },
            Shape::Rectangle {
                x,
                y,
                width,
                height,
                rotation,
            } => ShapeRepr::Rectangle(RectRepr {
                x,
                y,
                width,
                height,
                rotation,
            }),
        }
    }
}

// ─── Catalog ─────────────────────────────────────────────────────────────

/// Width and height of a floor plan's canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanDimensions {
    pub width: f64,
    pub height: f64,
}

/// A piece of furniture offered by a floor plan's palette.
/// `coordinates` is the as-designed template, not yet moved to a drop point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureCatalogItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub area: String,
    pub coordinates: Shape,
}

// ─── Placements ──────────────────────────────────────────────────────────

/// One piece of furniture placed on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedFurniture {
    /// Catalog reference.
    pub furniture_id: String,
    pub label: String,
    #[serde(default)]
    pub area: String,
    /// Current canvas-space geometry.
    pub coordinates: Shape,
    /// As-designed template shape; never changed after placement.
    pub original_coordinates: Shape,
    /// Applied rotation in degrees, `[0, 360)`, about the current centroid.
    #[serde(default, alias = "rotationDegrees")]
    pub rotation: f64,
}

impl PlacedFurniture {
    /// Place a catalog item with the given (already translated) geometry.
    pub fn from_catalog(item: &FurnitureCatalogItem, coordinates: Shape) -> Self {
        Self {
            furniture_id: item.id.clone(),
            label: item.label.clone(),
            area: item.area.clone(),
            coordinates,
            original_coordinates: item.coordinates.clone(),
            rotation: 0.0,
        }
    }
}

/// All placements on one floor plan, in insertion (paint) order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementMap(IndexMap<PlacementKey, PlacedFurniture>);

impl PlacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: PlacementKey) -> Option<&PlacedFurniture> {
        self.0.get(&key)
    }

    pub fn get_mut(&mut self, key: PlacementKey) -> Option<&mut PlacedFurniture> {
        self.0.get_mut(&key)
    }

    pub fn contains_key(&self, key: PlacementKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Insert or replace. A new key goes on top of the paint order.
    pub fn insert(&mut self, key: PlacementKey, placed: PlacedFurniture) -> Option<PlacedFurniture> {
        self.0.insert(key, placed)
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: PlacementKey) -> Option<PlacedFurniture> {
        self.0.shift_remove(&key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Entries bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PlacementKey, &PlacedFurniture)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = PlacementKey> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(PlacementKey, PlacedFurniture)> for PlacementMap {
    fn from_iter<I: IntoIterator<Item = (PlacementKey, PlacedFurniture)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shape_json_discriminates_structurally() {
        let poly: Shape = serde_json::from_str(r#"[{"x":0,"y":0},{"x":4,"y":0},{"x":4,"y":3}]"#).unwrap();
        assert_eq!(poly.kind_name(), "polygon");

        let curve: Shape = serde_json::from_str(
            r#"{"curve":{"start":{"x":0,"y":0},"end":{"x":10,"y":0},"control1":{"x":2,"y":5},"control2":{"x":8,"y":5}}}"#,
        )
        .unwrap();
        assert_eq!(curve.kind_name(), "curve");

        let arc: Shape = serde_json::from_str(
            r#"{"arc":{"start":{"x":0,"y":0},"end":{"x":10,"y":0},"radius":5,"sweepFlag":1}}"#,
        )
        .unwrap();
        match arc {
            Shape::Arc { radius, sweep, .. } => {
                assert_eq!(radius, 5.0);
                assert_eq!(sweep, SweepFlag::Clockwise);
            }
            other => panic!("expected arc, got {other:?}"),
        }

        let rect: Shape = serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(rect, Shape::rect(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn rectangle_serializes_with_rotation() {
        let json = serde_json::to_value(Shape::rect(90.0, 90.0, 20.0, 20.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 90.0, "y": 90.0, "width": 20.0, "height": 20.0, "rotation": 0.0})
        );
    }

    #[test]
    fn arc_serializes_sweep_flag_as_number() {
        let arc = Shape::Arc {
            start: Point::new(0.0, 0.0),
            end: Point::new(4.0, 0.0),
            radius: 2.0,
            sweep: SweepFlag::Clockwise,
        };
        let json = serde_json::to_value(&arc).unwrap();
        assert_eq!(json["arc"]["sweepFlag"], serde_json::json!(1));
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        assert!(serde_json::from_str::<Shape>(r#"[{"x":0,"y":0},{"x":1,"y":1}]"#).is_err());
        assert!(serde_json::from_str::<Shape>(r#"{"x":0,"y":0}"#).is_err());
        assert!(
            serde_json::from_str::<Shape>(
                r#"{"arc":{"start":{"x":0,"y":0},"end":{"x":1,"y":0},"radius":1,"sweepFlag":2}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn placed_furniture_accepts_rotation_degrees_alias() {
        let placed: PlacedFurniture = serde_json::from_str(
            r#"{
                "furnitureId": "sofa",
                "label": "Sofa",
                "area": "living",
                "coordinates": {"x":0,"y":0,"width":10,"height":5},
                "originalCoordinates": {"x":0,"y":0,"width":10,"height":5},
                "rotationDegrees": 180
            }"#,
        )
        .unwrap();
        assert_eq!(placed.rotation, 180.0);
    }

    #[test]
    fn placement_map_keeps_insertion_order_on_remove() {
        let item = FurnitureCatalogItem {
            id: "chair".into(),
            label: "Chair".into(),
            area: "dining".into(),
            coordinates: Shape::rect(0.0, 0.0, 5.0, 5.0),
        };
        let keys: Vec<_> = ["k_a", "k_b", "k_c"].iter().map(|s| PlacementKey::intern(s)).collect();
        let mut map = PlacementMap::new();
        for key in &keys {
            map.insert(*key, PlacedFurniture::from_catalog(&item, item.coordinates.clone()));
        }
        map.remove(keys[1]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![keys[0], keys[2]]);
    }

    #[test]
    fn bounds_overlap_is_signed() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(12.0, 3.0, 10.0, 10.0);
        assert_eq!(a.overlap_x(&b), -2.0);
        assert_eq!(a.overlap_y(&b), 7.0);
    }
}
