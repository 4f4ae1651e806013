//! Date windows, the linear time scale and month axis ticks.

use chrono::{Datelike, Months, NaiveDate};

use crate::errors::DashboardError;

/// The `[start, end]` date range shown on the burn-down chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    /// A window must span at least one day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if end <= start {
            return Err(DashboardError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Fit a window around `dates` and `now`.
    ///
    /// Starts on the first day of the month holding the earliest date and
    /// ends on the first day of the month after the latest one, so the
    /// result always spans at least one whole month.
    pub fn fit<I>(dates: I, now: NaiveDate) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let (earliest, latest) = dates
            .into_iter()
            .fold((now, now), |(lo, hi), d| (lo.min(d), hi.max(d)));
        let start = first_of_month(earliest);
        let end = first_of_month(latest)
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Linear mapping from dates to horizontal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    window: TimeWindow,
    width: f64,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, usable_width: f64) -> Result<Self, DashboardError> {
        Ok(Self::for_window(TimeWindow::new(start, end)?, usable_width))
    }

    /// Negative or NaN widths collapse to zero.
    pub fn for_window(window: TimeWindow, usable_width: f64) -> Self {
        let width = if usable_width.is_finite() && usable_width > 0.0 {
            usable_width
        } else {
            0.0
        };
        Self { window, width }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pixel offset of `date`, clamped to `[0, width]`.
    ///
    /// The window bounds map to exactly `0` and `width`.
    pub fn x(&self, date: NaiveDate) -> f64 {
        if date <= self.window.start {
            return 0.0;
        }
        if date >= self.window.end {
            return self.width;
        }
        let offset = (date - self.window.start).num_days() as f64;
        offset / self.window.days() as f64 * self.width
    }
}

/// A labelled position on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
}

/// First-of-month ticks inside the window, thinned evenly so that no more
/// than `max_ticks` remain.
pub fn month_ticks(scale: &TimeScale, max_ticks: usize) -> Vec<AxisTick> {
    if max_ticks == 0 {
        return Vec::new();
    }
    let window = scale.window();

    let mut months = Vec::new();
    let mut cursor = first_of_month(window.start);
    if cursor < window.start {
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }
    while cursor <= window.end {
        months.push(cursor);
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    let step = months.len().div_ceil(max_ticks).max(1);
    months
        .into_iter()
        .step_by(step)
        .map(|date| AxisTick {
            date,
            x: scale.x(date),
            label: date.format("%b %Y").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn scale() -> TimeScale {
        TimeScale::new(date("2017-04-01"), date("2018-12-31"), 600.0).unwrap()
    }

    #[test]
    fn test_bounds_map_exactly() {
        let s = scale();
        assert_eq!(s.x(date("2017-04-01")), 0.0);
        assert_eq!(s.x(date("2018-12-31")), 600.0);
    }

    #[test]
    fn test_bounds_exact_for_odd_widths() {
        for width in [1.0, 333.3, 0.1, 1e6] {
            let s = TimeScale::new(date("2020-01-01"), date("2020-01-08"), width).unwrap();
            assert_eq!(s.x(date("2020-01-01")), 0.0);
            assert_eq!(s.x(date("2020-01-08")), width);
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let s = TimeScale::new(date("2018-01-01"), date("2018-01-11"), 100.0).unwrap();
        assert!((s.x(date("2018-01-06")) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_window_dates_clamp() {
        let s = scale();
        assert_eq!(s.x(date("2010-01-01")), 0.0);
        assert_eq!(s.x(date("2030-01-01")), 600.0);
    }

    #[test]
    fn test_inverted_or_empty_window_rejected() {
        assert!(matches!(
            TimeScale::new(date("2018-01-01"), date("2018-01-01"), 10.0),
            Err(DashboardError::InvalidDateRange { .. })
        ));
        assert!(TimeWindow::new(date("2018-02-01"), date("2018-01-01")).is_err());
    }

    #[test]
    fn test_negative_width_collapses_to_zero() {
        let window = TimeWindow::new(date("2018-01-01"), date("2018-02-01")).unwrap();
        let s = TimeScale::for_window(window, -20.0);
        assert_eq!(s.width(), 0.0);
        assert_eq!(s.x(date("2018-01-15")), 0.0);
        assert_eq!(s.x(date("2018-02-01")), 0.0);
    }

    #[test]
    fn test_fit_rounds_to_months() {
        let window = TimeWindow::fit(
            vec![date("2018-03-14"), date("2018-07-02")],
            date("2018-06-01"),
        );
        assert_eq!(window.start, date("2018-03-01"));
        assert_eq!(window.end, date("2018-08-01"));
    }

    #[test]
    fn test_fit_without_dates_spans_current_month() {
        let window = TimeWindow::fit(Vec::new(), date("2018-06-15"));
        assert_eq!(window.start, date("2018-06-01"));
        assert_eq!(window.end, date("2018-07-01"));
        assert!(TimeWindow::new(window.start, window.end).is_ok());
    }

    #[test]
    fn test_month_ticks_cover_window() {
        let s = TimeScale::new(date("2018-01-15"), date("2018-05-01"), 400.0).unwrap();
        let ticks = month_ticks(&s, 18);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb 2018", "Mar 2018", "Apr 2018", "May 2018"]);
        assert_eq!(ticks.last().unwrap().x, 400.0);
    }

    #[test]
    fn test_month_ticks_thinned_to_limit() {
        let s = scale();
        let ticks = month_ticks(&s, 6);
        assert!(ticks.len() <= 6);
        assert_eq!(ticks[0].label, "Apr 2017");
        assert!(month_ticks(&s, 0).is_empty());
    }
}
