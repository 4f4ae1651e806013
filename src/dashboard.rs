//! The render pass: document → aggregation → layout → HTML.
//!
//! Every call recomputes everything from the document it is given; nothing
//! is cached between passes.

use chrono::NaiveDate;

use crate::aggregate::aggregate;
use crate::board_config::BoardToml;
use crate::errors::DashboardError;
use crate::layout::{
    ChartFrame, TimeScale, TimeWindow, layout_bars, layout_now_marker, layout_pie, month_ticks,
    pie_radius,
};
use crate::model::FeatureDocument;
use crate::overlay::requirements_for;
use crate::render::{
    BurndownChart, DashboardPage, FeatureOverlay, PieChart, render_burndown_svg, render_dashboard,
    render_pie_svg,
};

/// Settings for one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub now: NaiveDate,
    /// Fixed time window; fitted to the data when `None`.
    pub window: Option<(NaiveDate, NaiveDate)>,
    pub width: f64,
    pub height: f64,
    pub pie_width: f64,
    pub pie_height: f64,
    pub max_ticks: usize,
    /// Shown in the page header.
    pub source: String,
}

impl RenderOptions {
    pub fn from_config(toml: &BoardToml, now: NaiveDate, source: impl Into<String>) -> Self {
        let chart = &toml.chart;
        let window = match (chart.start, chart.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };
        Self {
            title: chart.title.clone(),
            now,
            window,
            width: chart.width,
            height: chart.height,
            pie_width: toml.pie.width,
            pie_height: toml.pie.height,
            max_ticks: chart.max_ticks,
            source: source.into(),
        }
    }

    /// Override the burn-down surface size.
    pub fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        self
    }
}

/// Render the complete dashboard page for `document`.
///
/// Fails on the first dangling reference or unrecognised status; all
/// dangling references are logged before failing.
pub fn render_document(
    document: &FeatureDocument,
    options: &RenderOptions,
) -> Result<String, DashboardError> {
    let mut problems = document.check_references().into_iter();
    if let Some(first) = problems.next() {
        for problem in problems {
            tracing::warn!(%problem, "dangling reference");
        }
        return Err(first);
    }

    let aggregation = aggregate(&document.features)?;
    let window = resolve_window(document, options)?;

    let frame = ChartFrame::new(options.width, options.height);
    let scale = TimeScale::for_window(window, frame.plot_width());
    let bars = layout_bars(
        &aggregation.ordered_features,
        &scale,
        options.now,
        frame.plot_height(),
    );
    let marker = layout_now_marker(&scale, options.now, frame.plot_height());
    let ticks = month_ticks(&scale, options.max_ticks);

    let radius = pie_radius(options.pie_width, options.pie_height);
    let slices = layout_pie(&aggregation.status_counts, radius);

    let overlays = aggregation
        .ordered_features
        .iter()
        .map(|feature| {
            Ok(FeatureOverlay {
                feature,
                rows: requirements_for(document, feature.id)?,
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    let pie_svg = render_pie_svg(&PieChart {
        slices: &slices,
        width: options.pie_width,
        height: options.pie_height,
        radius,
    });
    let burndown_svg = render_burndown_svg(&BurndownChart {
        title: &options.title,
        frame,
        features: &aggregation.ordered_features,
        bars: &bars,
        marker,
        ticks: &ticks,
    });

    tracing::debug!(
        features = bars.len(),
        window_start = %window.start,
        window_end = %window.end,
        width = options.width,
        height = options.height,
        "rendered charts"
    );

    Ok(render_dashboard(&DashboardPage {
        title: &options.title,
        generated_on: options.now,
        source: &options.source,
        pie_svg: &pie_svg,
        burndown_svg: &burndown_svg,
        overlays: &overlays,
    }))
}

/// Configured window, or one fitted to every date in the document.
fn resolve_window(
    document: &FeatureDocument,
    options: &RenderOptions,
) -> Result<TimeWindow, DashboardError> {
    match options.window {
        Some((start, end)) => TimeWindow::new(start, end),
        None => {
            let dates = document
                .features
                .values()
                .flat_map(|f| [f.start_date, f.completed_date])
                .flatten();
            Ok(TimeWindow::fit(dates, options.now))
        }
    }
}
