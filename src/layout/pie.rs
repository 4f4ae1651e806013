//! Pie slice angles and label placement.
//!
//! Angles are radians measured clockwise from 12 o'clock, matching SVG's
//! y-down coordinate system.

use std::f64::consts::TAU;

use crate::aggregate::StatusCount;
use crate::model::Status;

/// A point relative to the pie centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Point on a circle of `radius` at `angle`.
pub fn polar(angle: f64, radius: f64) -> Point {
    Point {
        x: radius * angle.sin(),
        y: -radius * angle.cos(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSliceGeometry {
    pub status: Status,
    pub label: &'static str,
    pub count: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub label_position: Point,
    /// Share of the total, rounded to one decimal place.
    pub percent: f64,
}

impl PieSliceGeometry {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Zero-count slices keep their legend entry but draw no arc.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Lay out one slice per count, in input order.
///
/// The last non-degenerate boundary lands on exactly `2π`. When every count is
/// zero all slices collapse to zero width at angle 0.
pub fn layout_pie(counts: &[StatusCount], radius: f64) -> Vec<PieSliceGeometry> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let angle_at = |cumulative: usize| {
        if total == 0 {
            0.0
        } else {
            TAU * (cumulative as f64 / total as f64)
        }
    };

    let mut cumulative = 0;
    counts
        .iter()
        .map(|c| {
            let start_angle = angle_at(cumulative);
            cumulative += c.count;
            let end_angle = angle_at(cumulative);
            let percent = if total == 0 {
                0.0
            } else {
                (1000.0 * c.count as f64 / total as f64).round() / 10.0
            };
            PieSliceGeometry {
                status: c.status,
                label: c.label,
                count: c.count,
                start_angle,
                end_angle,
                label_position: polar((start_angle + end_angle) / 2.0, radius / 2.0),
                percent,
            }
        })
        .collect()
}

/// Pie radius for a surface, leaving room for the legend.
pub fn pie_radius(width: f64, height: f64) -> f64 {
    (width.min(height) / 2.5).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(completed: usize, in_progress: usize, not_started: usize) -> Vec<StatusCount> {
        [
            (Status::Completed, completed),
            (Status::InProgress, in_progress),
            (Status::NotStarted, not_started),
        ]
        .into_iter()
        .map(|(status, count)| StatusCount {
            status,
            label: status.label(),
            count,
        })
        .collect()
    }

    #[test]
    fn test_angles_cover_full_circle() {
        for (a, b, c) in [(1, 1, 1), (3, 0, 7), (0, 0, 5), (0, 4, 0), (13, 17, 19)] {
            let slices = layout_pie(&counts(a, b, c), 100.0);
            assert_eq!(slices.len(), 3);
            assert_eq!(slices[0].start_angle, 0.0);
            assert_eq!(slices[2].end_angle, TAU);
            let total: f64 = slices.iter().map(|s| s.sweep()).sum();
            assert!((total - TAU).abs() < 1e-12);
        }
    }

    #[test]
    fn test_slices_are_contiguous_in_input_order() {
        let slices = layout_pie(&counts(1, 2, 1), 100.0);
        let order: Vec<Status> = slices.iter().map(|s| s.status).collect();
        assert_eq!(order, Status::ALL.to_vec());
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert!((slices[1].sweep() - TAU / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_counts_draw_no_arc() {
        let slices = layout_pie(&counts(2, 0, 2), 100.0);
        assert!(slices[1].is_empty());
        assert_eq!(slices[1].sweep(), 0.0);
        assert_eq!(slices[1].label, "In Progress");
    }

    #[test]
    fn test_all_zero_counts_collapse() {
        let slices = layout_pie(&counts(0, 0, 0), 100.0);
        assert!(slices.iter().all(|s| s.sweep() == 0.0 && s.percent == 0.0));
    }

    #[test]
    fn test_percent_rounded_to_one_decimal() {
        let slices = layout_pie(&counts(1, 1, 1), 100.0);
        assert_eq!(slices[0].percent, 33.3);
        let slices = layout_pie(&counts(2, 1, 0), 100.0);
        assert_eq!(slices[0].percent, 66.7);
    }

    #[test]
    fn test_label_at_half_radius_centroid() {
        // Single half slice from 12 o'clock to 6 o'clock: centroid points at 3 o'clock.
        let slices = layout_pie(&counts(1, 1, 0), 100.0);
        let p = slices[0].label_position;
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_pie_radius() {
        assert_eq!(pie_radius(400.0, 500.0), 160.0);
        assert_eq!(pie_radius(-5.0, 100.0), 0.0);
    }
}
