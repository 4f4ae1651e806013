//! Burn-down bar geometry, the "now" marker and the chart frame.

use chrono::NaiveDate;

use super::scale::TimeScale;
use crate::aggregate::AggregatedFeature;
use crate::model::Status;

/// Outer surface size split into the title band, axis bands and plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub title_height: f64,
    pub y_axis_width: f64,
    pub x_axis_height: f64,
    pub right_padding: f64,
}

impl ChartFrame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            title_height: 50.0,
            y_axis_width: 50.0,
            x_axis_height: 90.0,
            right_padding: 50.0,
        }
    }

    /// Width available to the time scale.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.y_axis_width - self.right_padding).max(0.0)
    }

    /// Height shared by the feature bands.
    pub fn plot_height(&self) -> f64 {
        (self.height - self.title_height - self.x_axis_height).max(0.0)
    }
}

/// One feature's bar in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBarGeometry {
    pub feature_id: String,
    pub status: Status,
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
    pub height: f64,
}

impl FeatureBarGeometry {
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn css_class(&self) -> &'static str {
        self.status.bar_class()
    }
}

/// Lay out one horizontal band per feature, top to bottom in input order.
///
/// Bars run from the feature's start date (or the window start when it has
/// none) to its completion date when Completed, and to `now` otherwise.
pub fn layout_bars(
    features: &[AggregatedFeature<'_>],
    scale: &TimeScale,
    now: NaiveDate,
    canvas_height: f64,
) -> Vec<FeatureBarGeometry> {
    if features.is_empty() {
        return Vec::new();
    }
    let band = canvas_height.max(0.0) / features.len() as f64;
    let window = scale.window();

    features
        .iter()
        .enumerate()
        .map(|(index, f)| {
            let start = f.start_date().unwrap_or(window.start);
            let end = match f.status {
                Status::Completed => f.completed_date().unwrap_or(now),
                Status::InProgress | Status::NotStarted => now,
            };
            let x_start = scale.x(start);
            let x_end = scale.x(end).max(x_start);
            FeatureBarGeometry {
                feature_id: f.id.to_string(),
                status: f.status,
                x_start,
                x_end,
                y: index as f64 * band,
                height: band,
            }
        })
        .collect()
}

/// Region right of "now" that is de-emphasised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FutureMask {
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

/// Vertical line at the render date plus the future mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowMarker {
    pub x: f64,
    pub height: f64,
    pub mask: FutureMask,
}

pub fn layout_now_marker(scale: &TimeScale, now: NaiveDate, canvas_height: f64) -> NowMarker {
    let x = scale.x(now);
    let height = canvas_height.max(0.0);
    NowMarker {
        x,
        height,
        mask: FutureMask {
            x,
            width: scale.width() - x,
            height,
        },
    }
}
