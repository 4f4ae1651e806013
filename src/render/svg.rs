//! SVG markup for the pie chart and the burn-down chart.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use super::{BURNDOWN_CHART_ID, PIE_CHART_ID, escape_html, num, overlay_anchor};
use crate::aggregate::AggregatedFeature;
use crate::layout::{AxisTick, ChartFrame, FeatureBarGeometry, NowMarker, PieSliceGeometry, polar};
const TODAY_LINE_EXTENSION: f64 = 65.0;
const LEGEND_ROW_HEIGHT: f64 = 18.0;

/// Inputs for [`render_pie_svg`].
pub struct PieChart<'a> {
    pub slices: &'a [PieSliceGeometry],
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

pub fn render_pie_svg(chart: &PieChart<'_>) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg id="{}" class="chart" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        PIE_CHART_ID,
        num(chart.width),
        num(chart.height),
        num(chart.width),
        num(chart.height)
    );
    let _ = writeln!(
        svg,
        r#"<g class="pie" transform="translate({}, {})">"#,
        num(chart.width / 2.0),
        num(chart.height / 2.0)
    );

    for slice in chart.slices.iter().filter(|s| !s.is_empty()) {
        let tooltip = format!("{}\n{}\n{}%", slice.label, slice.count, slice.percent);
        let shape = slice_shape(slice, chart.radius);
        let _ = writeln!(
            svg,
            r#"<{} class="{}"><title>{}</title></{}>"#,
            shape.open,
            slice.status.slice_class(),
            escape_html(&tooltip),
            shape.tag
        );
        let _ = writeln!(
            svg,
            r#"<text class="sliceLabel" x="{}" y="{}" text-anchor="middle" dy="0.35em">{}</text>"#,
            num(slice.label_position.x),
            num(slice.label_position.y),
            slice.count
        );
    }
    svg.push_str("</g>\n");

    // Legend lists every status, including empty ones.
    svg.push_str("<g class=\"legend\" transform=\"translate(8, 8)\">\n");
    for (row, slice) in chart.slices.iter().enumerate() {
        let y = row as f64 * LEGEND_ROW_HEIGHT;
        let _ = writeln!(
            svg,
            r#"<rect class="{}" x="0" y="{}" width="12" height="12"/><text x="18" y="{}" dy="0.8em">{} ({})</text>"#,
            slice.status.slice_class(),
            num(y),
            num(y),
            escape_html(slice.label),
            slice.count
        );
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

struct Shape {
    tag: &'static str,
    open: String,
}

fn slice_shape(slice: &PieSliceGeometry, radius: f64) -> Shape {
    if slice.sweep() >= TAU - 1e-9 {
        return Shape {
            tag: "circle",
            open: format!(r#"circle cx="0" cy="0" r="{}""#, num(radius)),
        };
    }
    let from = polar(slice.start_angle, radius);
    let to = polar(slice.end_angle, radius);
    let large_arc = if slice.sweep() > PI { 1 } else { 0 };
    Shape {
        tag: "path",
        open: format!(
            r#"path d="M0,0 L{},{} A{},{} 0 {} 1 {},{} Z""#,
            num(from.x),
            num(from.y),
            num(radius),
            num(radius),
            large_arc,
            num(to.x),
            num(to.y)
        ),
    }
}

/// Inputs for [`render_burndown_svg`]. `bars` and `features` are parallel.
pub struct BurndownChart<'a> {
    pub title: &'a str,
    pub frame: ChartFrame,
    pub features: &'a [AggregatedFeature<'a>],
    pub bars: &'a [FeatureBarGeometry],
    pub marker: NowMarker,
    pub ticks: &'a [AxisTick],
}

pub fn render_burndown_svg(chart: &BurndownChart<'_>) -> String {
    let frame = &chart.frame;
    let plot_width = frame.plot_width();
    let plot_height = frame.plot_height();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg id="{}" class="chart" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        BURNDOWN_CHART_ID,
        num(frame.width),
        num(frame.height),
        num(frame.width),
        num(frame.height)
    );
    let _ = writeln!(
        svg,
        r#"<text class="title" x="{}" y="{}" text-anchor="middle">{}</text>"#,
        num(frame.width / 2.0),
        num(frame.title_height / 2.0),
        escape_html(chart.title)
    );
    // Rotated -90deg, so x runs vertically.
    let _ = writeln!(
        svg,
        r#"<text class="y-axis-label" font-size="12px" text-anchor="middle" y="20" dy="0.75em" x="{}" transform="rotate(-90)">Features</text>"#,
        num(-(frame.title_height + plot_height / 2.0))
    );
    let _ = writeln!(
        svg,
        r#"<g class="histo" transform="translate({}, {})">"#,
        num(frame.y_axis_width),
        num(frame.title_height)
    );

    if chart.bars.is_empty() {
        let _ = writeln!(
            svg,
            r#"<text class="empty-state" x="{}" y="{}" text-anchor="middle">No features to display.</text>"#,
            num(plot_width / 2.0),
            num(plot_height / 2.0)
        );
    }

    for (bar, feature) in chart.bars.iter().zip(chart.features) {
        write_bar(&mut svg, bar, feature);
    }

    write_now_marker(&mut svg, &chart.marker);
    write_x_axis(&mut svg, chart.ticks, plot_width, plot_height);

    svg.push_str("</g>\n</svg>\n");
    svg
}

fn write_bar(svg: &mut String, bar: &FeatureBarGeometry, feature: &AggregatedFeature<'_>) {
    let tooltip = format!(
        "{}\n{}\n{}% done",
        feature.feature.description,
        feature.feature.requirements.join(", "),
        feature.percent_done
    );
    let _ = writeln!(
        svg,
        r##"<a href="#{}"><rect class="{}" x="{}" y="{}" width="{}" height="{}"><title>{}</title></rect></a>"##,
        escape_html(&overlay_anchor(&bar.feature_id)),
        bar.css_class(),
        num(bar.x_start),
        num(bar.y),
        num(bar.width()),
        num(bar.height),
        escape_html(&tooltip)
    );
    let _ = writeln!(
        svg,
        r#"<text class="barLabel" x="{}" y="{}" dy="0.35em">{}</text>"#,
        num(bar.x_start + 4.0),
        num(bar.y + bar.height / 2.0),
        escape_html(&feature.feature.description)
    );
}

fn write_now_marker(svg: &mut String, marker: &NowMarker) {
    let _ = writeln!(
        svg,
        r#"<rect class="futureMask" x="{}" y="0" width="{}" height="{}"/>"#,
        num(marker.mask.x),
        num(marker.mask.width),
        num(marker.mask.height)
    );
    let line_end = marker.height + TODAY_LINE_EXTENSION;
    let _ = writeln!(
        svg,
        r#"<line class="todayLine" x1="{x}" x2="{x}" y1="0" y2="{}"/>"#,
        num(line_end),
        x = num(marker.x)
    );
    let _ = writeln!(
        svg,
        r#"<text class="todayLabel" x="{}" y="{}" text-anchor="middle">Today</text>"#,
        num(marker.x),
        num(line_end + 15.0)
    );
}

fn write_x_axis(svg: &mut String, ticks: &[AxisTick], plot_width: f64, plot_height: f64) {
    let _ = writeln!(
        svg,
        r#"<g class="x-axis" transform="translate(0, {})">"#,
        num(plot_height)
    );
    let _ = writeln!(
        svg,
        r#"<line class="domain" x1="0" x2="{}" y1="0" y2="0"/>"#,
        num(plot_width)
    );
    for tick in ticks {
        let _ = writeln!(
            svg,
            r#"<g class="tick" transform="translate({}, 0)"><line y2="6"/><text y="9" dx="-0.8em" dy="0.15em" text-anchor="end" transform="rotate(-60)">{}</text></g>"#,
            num(tick.x),
            escape_html(&tick.label)
        );
    }
    svg.push_str("</g>\n");
}
