//! Self-contained HTML page: both maps as inline SVG, legends, tooltip, toggle.
//!
//! The inline script applies the same hover and toggle transitions as
//! [`crate::interact::MapView`] and [`crate::interact::MapToggle`].

use super::legend::{LEGEND_ORIGIN, Legend, TICK_SIZE};
use super::types::MapPanel;
use crate::format::escape_html;
use crate::interact::TOOLTIP_OFFSET;
use crate::models::NO_DATA_COLOR;
use crate::render::RenderedMap;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Render the full page. The first panel is shown, the others start hidden.
pub fn render_page(title: &str, panels: &[MapPanel]) -> String {
    let body: String = panels
        .iter()
        .enumerate()
        .map(|(i, p)| render_panel(i, p))
        .collect();
    let script = inline_javascript()
        .replace("__DX__", &TOOLTIP_OFFSET.0.to_string())
        .replace("__DY__", &TOOLTIP_OFFSET.1.to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <button id="toggleButton" type="button">Toggle map</button>
{body}    <div id="tooltip" class="tooltip"></div>
    <script>{script}</script>
</body>
</html>
"#,
        title = escape_html(title),
        css = inline_css(),
    )
}

pub fn write_page<P: AsRef<Path>>(path: P, title: &str, panels: &[MapPanel]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_page(title, panels))
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    log::info!("wrote {} map(s) to {}", panels.len(), path.display());
    Ok(())
}

fn render_panel(i: usize, panel: &MapPanel) -> String {
    let hidden = if i == 0 { "" } else { " hidden" };
    match panel {
        MapPanel::Failed { title, message } => format!(
            r#"    <div id="map-{i}" class="map map-error{hidden}" role="alert">
        <h2>{title}</h2>
        <p>Could not load this map: {message}</p>
    </div>
"#,
            title = escape_html(title),
            message = escape_html(message),
        ),
        MapPanel::Ready {
            title,
            map,
            legend,
            width,
            height,
        } => format!(
            r##"    <svg id="map-{i}" class="map{hidden}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img" aria-label="{title}">
        <defs>
            <pattern id="no-data-{i}" width="6" height="6" patternUnits="userSpaceOnUse">
                <rect width="6" height="6" fill="{gray}"/>
                <path d="M0,6L6,0" stroke="#999999" stroke-width="1"/>
            </pattern>
        </defs>
        <g class="regions">
{regions}        </g>
{legend}    </svg>
"##,
            title = escape_html(title),
            gray = NO_DATA_COLOR,
            regions = render_regions(i, map),
            legend = render_legend(legend),
        ),
    }
}

fn render_regions(panel: usize, map: &RenderedMap) -> String {
    let mut out = String::new();
    for shape in &map.shapes {
        let (class, fill) = if shape.fill.is_no_data() {
            ("region no-data", format!("url(#no-data-{panel})"))
        } else {
            ("region", shape.fill.color().to_string())
        };
        let _ = writeln!(
            out,
            r#"            <path class="{class}" d="{d}" fill="{fill}" fill-rule="evenodd" data-name="{name}" data-tooltip="{tooltip}"/>"#,
            d = shape.path,
            name = escape_html(&shape.name),
            tooltip = escape_html(&shape.tooltip_html()),
        );
    }
    out
}

fn render_legend(legend: &Legend) -> String {
    let mut out = format!(
        "        <g class=\"legend\" transform=\"translate({}, {})\">\n",
        LEGEND_ORIGIN.0, LEGEND_ORIGIN.1
    );
    for e in &legend.entries {
        let _ = writeln!(
            out,
            r#"            <rect x="0" y="{:.2}" width="{}" height="{:.2}" fill="{}"/>"#,
            e.y, legend.width, e.height, e.color
        );
    }
    let _ = writeln!(
        out,
        r#"            <g class="legend-axis" transform="translate({}, 0)">"#,
        legend.width
    );
    for t in &legend.ticks {
        let _ = writeln!(
            out,
            r#"                <g class="tick" transform="translate(0, {y:.2})"><line x2="{size}" stroke="currentColor"/><text x="{tx}" dy="0.32em">{label}</text></g>"#,
            y = t.y,
            size = TICK_SIZE,
            tx = TICK_SIZE + 3.0,
            label = escape_html(&t.label),
        );
    }
    out.push_str("            </g>\n        </g>\n");
    out
}

fn inline_css() -> &'static str {
    r#"
body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    color: #111827;
    background: #ffffff;
    margin: 1rem 2rem;
}
.hidden { display: none; }
.region {
    stroke: #ffffff;
    stroke-width: 0.5;
    transition: opacity 0.2s;
}
.region.dimmed { opacity: 0.4; }
.region.active { opacity: 1; stroke: #111827; stroke-width: 1.5; }
.legend text { font-size: 11px; fill: #374151; }
.tooltip {
    position: absolute;
    visibility: hidden;
    pointer-events: none;
    background: rgba(17, 24, 39, 0.9);
    color: #ffffff;
    padding: 6px 8px;
    border-radius: 4px;
    font-size: 13px;
}
.map-error {
    border: 2px solid #b91c1c;
    background: #fef2f2;
    color: #7f1d1d;
    padding: 1rem;
    max-width: 40rem;
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
    var tooltip = document.getElementById('tooltip');
    function place(event) {
        tooltip.style.left = (event.pageX + __DX__) + 'px';
        tooltip.style.top = (event.pageY + __DY__) + 'px';
    }
    document.querySelectorAll('svg.map').forEach(function (svg) {
        var shapes = Array.prototype.slice.call(svg.querySelectorAll('path.region'));
        shapes.forEach(function (shape) {
            shape.addEventListener('mouseover', function (event) {
                shapes.forEach(function (s) { s.classList.add('dimmed'); s.classList.remove('active'); });
                shape.classList.remove('dimmed');
                shape.classList.add('active');
                tooltip.innerHTML = shape.getAttribute('data-tooltip');
                tooltip.style.visibility = 'visible';
                place(event);
            });
            shape.addEventListener('mousemove', function (event) {
                if (tooltip.style.visibility === 'visible') { place(event); }
            });
            shape.addEventListener('mouseout', function () {
                shapes.forEach(function (s) { s.classList.remove('dimmed'); s.classList.remove('active'); });
                tooltip.style.visibility = 'hidden';
            });
        });
    });
    var panels = document.querySelectorAll('.map');
    var visible = 0;
    document.getElementById('toggleButton').addEventListener('click', function () {
        if (panels.length === 0) { return; }
        panels[visible].classList.add('hidden');
        visible = (visible + 1) % panels.length;
        panels[visible].classList.remove('hidden');
    });
})();
"#
}
