//! SVG export of a floor-plan layout.
//!
//! Emits the floor outline, then every placement in paint order as a group
//! carrying the combined placement transform, with its label centered on the
//! shape's centroid. The selected placement gets a highlight stroke and a
//! dashed box around its drawn extent.

use crate::path::visual_bounds;
use fp_core::geometry::{centroid, placement_transform, to_drawable_path};
use fp_core::id::PlacementKey;
use fp_core::model::{FloorPlanDimensions, PlacementMap};
use std::fmt::Write as _;

/// Colors used by the SVG renderer.
#[derive(Debug, Clone)]
pub struct SvgTheme {
    pub background: &'static str,
    pub floor_stroke: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub selected_stroke: &'static str,
    pub label: &'static str,
}

impl SvgTheme {
    pub fn light() -> Self {
        Self {
            background: "#FFFFFF",
            floor_stroke: "#CBD5E1",
            fill: "rgba(59, 130, 246, 0.25)",
            stroke: "#1D4ED8",
            selected_stroke: "#F59E0B",
            label: "#0F172A",
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#0F172A",
            floor_stroke: "#334155",
            fill: "rgba(96, 165, 250, 0.30)",
            stroke: "#93C5FD",
            selected_stroke: "#FBBF24",
            label: "#F1F5F9",
        }
    }
}

impl Default for SvgTheme {
    fn default() -> Self {
        Self::light()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the whole layout as a standalone SVG document in canvas units.
pub fn render_svg(
    dimensions: FloorPlanDimensions,
    placements: &PlacementMap,
    selected: Option<PlacementKey>,
    theme: &SvgTheme,
) -> String {
    let FloorPlanDimensions { width, height } = dimensions;
    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\" stroke=\"{}\"/>",
        theme.background, theme.floor_stroke
    );

    for (key, placed) in placements.iter() {
        let is_selected = selected == Some(key);
        let drawable = to_drawable_path(&placed.coordinates);
        let transform = placement_transform(placed);
        let stroke = if is_selected {
            theme.selected_stroke
        } else {
            theme.stroke
        };

        let _ = write!(svg, "  <g data-key=\"{}\"", escape_xml(key.as_str()));
        if !transform.is_empty() {
            let _ = write!(svg, " transform=\"{transform}\"");
        }
        svg.push_str(">\n");
        let _ = writeln!(
            svg,
            "    <path d=\"{}\" fill=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"/>",
            drawable.path,
            theme.fill,
            if is_selected { 2 } else { 1 }
        );
        let c = centroid(&placed.coordinates);
        let _ = writeln!(
            svg,
            "    <text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"10\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            c.x,
            c.y,
            theme.label,
            escape_xml(&placed.label)
        );
        svg.push_str("  </g>\n");

        if is_selected {
            let bb = visual_bounds(placed);
            let _ = writeln!(
                svg,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-dasharray=\"4 2\"/>",
                bb.x0,
                bb.y0,
                bb.width(),
                bb.height(),
                theme.selected_stroke
            );
        }
    }

    svg.push_str("</svg>\n");
    log::trace!("rendered {} placements to SVG", placements.len());
    svg
}
