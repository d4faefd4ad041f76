//! HTML page holding the map SVG, the hover tooltip and the legend SVG.

use std::fmt::Write;

use glam::DVec2;

use crate::map::{Rgb, Scene, CITY_OPACITY};

pub const LEGEND_WIDTH: u32 = 140;
pub const LEGEND_HEIGHT: u32 = 200;
const LEGEND_ROW_HEIGHT: u32 = 20;
const LEGEND_SWATCH: u32 = 18;

const STATE_STROKE: &str = "#fff";
const STATE_STROKE_WIDTH: u32 = 1;

/// Tooltip fade-in on mouse-over, milliseconds
pub const TOOLTIP_FADE_IN_MS: u32 = 200;
/// Tooltip fade-out on mouse-out, milliseconds
pub const TOOLTIP_FADE_OUT_MS: u32 = 500;
pub const TOOLTIP_OPACITY: f64 = 0.9;
/// Tooltip sits this many pixels above the cursor
const TOOLTIP_OFFSET_Y: i32 = 28;

/// Escape text for XML/HTML content and attribute values
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Round to three decimals and print without trailing zeros
fn coord(v: f64) -> f64 {
    let v = (v * 1000.0).round() / 1000.0;
    // Avoid "-0"
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// SVG path data with one `M…L…Z` subpath per ring
pub fn path_data(rings: &[Vec<DVec2>]) -> String {
    let mut d = String::new();
    for ring in rings {
        for (i, p) in ring.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{},{}", coord(p.x), coord(p.y));
        }
        if !ring.is_empty() {
            d.push('Z');
        }
    }
    d
}

/// The 960x500 map: one path per state, then one circle per city
pub fn map_svg(scene: &Scene) -> String {
    let mut svg = format!(
        r#"<svg width="{}" height="{}">"#,
        scene.width, scene.height
    );
    svg.push('\n');

    for state in &scene.states {
        let _ = write!(
            svg,
            r#"  <path d="{}" style="stroke: {STATE_STROKE}; stroke-width: {STATE_STROKE_WIDTH}; fill: {}""#,
            path_data(&state.rings),
            state.fill
        );
        if let Some(name) = &state.name {
            let _ = write!(svg, r#" data-state="{}""#, escape_xml(name));
        }
        svg.push_str("/>\n");
    }

    for city in &scene.cities {
        let place = escape_xml(&city.place);
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" style="fill: {}; opacity: {CITY_OPACITY}" data-place="{place}"><title>{place}</title></circle>"#,
            coord(city.center.x),
            coord(city.center.y),
            coord(city.radius),
            Rgb::CITY,
        );
    }

    svg.push_str("</svg>");
    svg
}

/// The 140x200 legend: a swatch and label per row
pub fn legend_svg(scene: &Scene) -> String {
    let mut svg = format!(
        r#"<svg class="legend" width="{LEGEND_WIDTH}" height="{LEGEND_HEIGHT}">"#
    );
    svg.push('\n');

    for (i, entry) in scene.legend.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"  <g transform="translate(0,{})"><rect width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" style="fill: {}"/><text x="24" y="9" dy=".35em">{}</text></g>"#,
            i as u32 * LEGEND_ROW_HEIGHT,
            entry.swatch,
            escape_xml(entry.label)
        );
    }

    svg.push_str("</svg>");
    svg
}

fn tooltip_script() -> String {
    format!(
        r#"<script>
(function() {{
    const tooltip = document.querySelector("div.tooltip");
    document.querySelectorAll("circle[data-place]").forEach((circle) => {{
        circle.addEventListener("mouseover", (event) => {{
            tooltip.style.transition = "opacity {TOOLTIP_FADE_IN_MS}ms";
            tooltip.style.opacity = {TOOLTIP_OPACITY};
            tooltip.textContent = circle.dataset.place;
            tooltip.style.left = event.pageX + "px";
            tooltip.style.top = (event.pageY - {TOOLTIP_OFFSET_Y}) + "px";
        }});
        circle.addEventListener("mouseout", () => {{
            tooltip.style.transition = "opacity {TOOLTIP_FADE_OUT_MS}ms";
            tooltip.style.opacity = 0;
        }});
    }});
}})();
</script>"#
    )
}

/// Full HTML page: map, hidden tooltip, legend, tooltip behaviour
pub fn document(scene: &Scene) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>States Lived</title>\n\
         <style>div.tooltip { position: absolute; pointer-events: none; }</style>\n\
         </head>\n<body>\n",
    );
    html.push_str(&map_svg(scene));
    html.push_str("\n<div class=\"tooltip\" style=\"opacity: 0;\"></div>\n");
    html.push_str(&legend_svg(scene));
    html.push('\n');
    html.push_str(&tooltip_script());
    html.push_str("\n</body>\n</html>\n");
    html
}
