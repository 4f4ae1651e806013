//! Chart layout: pure functions from aggregated data and surface sizes to
//! geometric primitives. Nothing here knows how the shapes get drawn.
//!
//! | Module  | Produces                                          |
//! |---------|---------------------------------------------------|
//! | `scale` | `TimeWindow`, `TimeScale`, month `AxisTick`s      |
//! | `bars`  | `ChartFrame`, `FeatureBarGeometry`, `NowMarker`   |
//! | `pie`   | `PieSliceGeometry`                                |

pub mod bars;
pub mod pie;
pub mod scale;

pub use bars::{ChartFrame, FeatureBarGeometry, FutureMask, NowMarker, layout_bars, layout_now_marker};
pub use pie::{PieSliceGeometry, Point, layout_pie, pie_radius, polar};
pub use scale::{AxisTick, TimeScale, TimeWindow, month_ticks};
