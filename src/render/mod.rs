//! HTML/SVG rendering of laid-out charts.
//!
//! Renderers are pure: they take geometry and data and return markup. Hover
//! tooltips are SVG `<title>` elements; clicking a bar navigates to the
//! feature's overlay fragment (`#feature-<id>`), which CSS `:target` reveals.

pub mod page;
pub mod svg;

pub use page::{DashboardPage, FeatureOverlay, render_dashboard, render_error_page};
pub use svg::{BurndownChart, PieChart, render_burndown_svg, render_pie_svg};

/// Element id of the pie chart surface.
pub const PIE_CHART_ID: &str = "features-pie-chart";
/// Element id of the burn-down chart surface.
pub const BURNDOWN_CHART_ID: &str = "burn-down-chart";

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact number for SVG attributes: at most two decimals, no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Fragment id of a feature's detail overlay.
pub fn overlay_anchor(feature_id: &str) -> String {
    format!("feature-{}", feature_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(600.0), "600");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn test_overlay_anchor() {
        assert_eq!(overlay_anchor("psm-feature-000"), "feature-psm-feature-000");
    }
}
