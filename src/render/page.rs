//! Full dashboard HTML document.

use std::fmt::Write;

use chrono::NaiveDate;

use super::{escape_html, overlay_anchor};
use crate::aggregate::AggregatedFeature;
use crate::overlay::{IssueLink, RequirementRow};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; color: #222; background: #fafafa; }
header { padding: 16px 24px; background: #24292e; color: #fff; }
header h1 { margin: 0; font-size: 20px; }
header .meta { font-size: 12px; color: #aaa; }
main { padding: 16px 24px; }
.controls { margin-bottom: 12px; font-size: 14px; }
.charts { display: flex; flex-wrap: wrap; gap: 24px; align-items: flex-start; }
.chart { background: #fff; border: 1px solid #ddd; }
.chart .title { font-size: 16px; font-weight: 600; }
.completed { fill: #2ca02c; }
.in-progress { fill: #ff7f0e; }
.not-started { fill: #bbb; }
.sliceLabel { fill: #fff; font-size: 12px; font-weight: 600; pointer-events: none; }
.legend text { font-size: 12px; }
.bar { stroke: #fff; stroke-width: 1px; cursor: pointer; }
.barCompleted { fill: #2ca02c; }
.barInProgress { fill: #ff7f0e; }
.barNotStarted { fill: #bbb; }
.bar:hover { opacity: 0.8; }
.barLabel { display: none; font-size: 10px; pointer-events: none; }
#toggle-descriptions:checked ~ .charts .barLabel { display: inline; }
.futureMask { fill: #fff; opacity: 0.6; pointer-events: none; }
.todayLine { stroke: orange; stroke-width: 2px; }
.todayLabel { fill: orange; font-size: 12px; }
.x-axis line { stroke: #444; }
.x-axis text { font-size: 10px; }
.empty-state { fill: #888; font-size: 14px; }
.darkBackground { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); z-index: 10; }
.darkBackground:target { display: block; }
.backdropClose { position: absolute; inset: 0; }
.overlay { position: relative; margin: 5vh auto; max-width: 900px; max-height: 85vh; overflow: auto; background: #fff; padding: 16px 24px; border-radius: 4px; }
.overlay .close { position: absolute; top: 8px; right: 12px; text-decoration: none; font-size: 20px; color: #444; }
.overlay table { border-collapse: collapse; width: 100%; font-size: 13px; }
.overlay th, .overlay td { border-bottom: 1px solid #eee; padding: 4px 8px; text-align: left; vertical-align: top; }
.reqIdCell { white-space: nowrap; }
.statusCell { white-space: nowrap; }
.issueLink { color: #0366d6; }
.completedIssueLink { color: #2ca02c; text-decoration: line-through; }
.error { color: #b00020; }
"#;

/// A feature's detail overlay: the feature plus its resolved requirement rows.
pub struct FeatureOverlay<'a> {
    pub feature: &'a AggregatedFeature<'a>,
    pub rows: Vec<RequirementRow>,
}

/// Everything the page needs, already laid out and rendered to SVG.
pub struct DashboardPage<'a> {
    pub title: &'a str,
    pub generated_on: NaiveDate,
    /// Human-readable description of where the data came from.
    pub source: &'a str,
    pub pie_svg: &'a str,
    pub burndown_svg: &'a str,
    pub overlays: &'a [FeatureOverlay<'a>],
}

pub fn render_dashboard(page: &DashboardPage<'_>) -> String {
    let mut html = String::new();
    write_head(&mut html, page.title);

    let _ = writeln!(
        html,
        r#"<header><h1>{}</h1><div class="meta">Data from {} as of {}</div></header>"#,
        escape_html(page.title),
        escape_html(page.source),
        page.generated_on.format("%Y-%m-%d")
    );
    html.push_str("<main>\n");
    html.push_str(
        r#"<input type="checkbox" id="toggle-descriptions"><label class="controls" for="toggle-descriptions"> Show feature descriptions</label>"#,
    );
    html.push('\n');
    html.push_str("<div class=\"charts\">\n");
    html.push_str(page.pie_svg);
    html.push_str(page.burndown_svg);
    html.push_str("</div>\n");

    for overlay in page.overlays {
        write_overlay(&mut html, overlay);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Minimal page shown in place of the dashboard when the data cannot be used.
pub fn render_error_page(title: &str, message: &str) -> String {
    let mut html = String::new();
    write_head(&mut html, title);
    let _ = writeln!(
        html,
        r#"<header><h1>{}</h1></header><main><p class="error">{}</p></main>"#,
        escape_html(title),
        escape_html(message)
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn write_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
}

fn write_overlay(html: &mut String, overlay: &FeatureOverlay<'_>) {
    let feature = overlay.feature;
    let _ = writeln!(
        html,
        r##"<div class="darkBackground" id="{}"><a class="backdropClose" href="#"></a><div class="overlay">"##,
        escape_html(&overlay_anchor(feature.id))
    );
    html.push_str("<a class=\"close\" href=\"#\" title=\"Close\">&times;</a>\n");
    let _ = writeln!(
        html,
        "<h2>Feature {}</h2>\n<p>{}</p>\n<p>Status: {} ({}% done)</p>",
        escape_html(feature.id),
        escape_html(&feature.feature.description),
        feature.status,
        feature.percent_done
    );
    html.push_str("<h3>Requirements</h3>\n");

    if overlay.rows.is_empty() {
        html.push_str("<p>No requirements.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Description</th><th>Status</th><th>Issues</th></tr></thead>\n<tbody>\n",
        );
        for row in &overlay.rows {
            let _ = writeln!(
                html,
                r#"<tr><td class="reqIdCell">{}</td><td class="descriptionCell">{}</td><td class="statusCell">{}</td><td class="issuesCell">{}</td></tr>"#,
                escape_html(&row.id),
                escape_html(&row.description),
                row.status,
                issue_links(&row.issues)
            );
        }
        html.push_str("</tbody>\n</table>\n");
    }
    html.push_str("</div></div>\n");
}

/// Only http(s) URLs become links; anything else (`javascript:`, `data:`)
/// is shown as plain text.
fn is_web_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

fn issue_links(issues: &[IssueLink]) -> String {
    issues
        .iter()
        .map(|issue| {
            if is_web_url(&issue.url) {
                format!(
                    r#"<a class="{}" href="{}" title="{}" target="_blank" rel="noopener">#{}</a>"#,
                    issue.css_class(),
                    escape_html(issue.url.trim_start()),
                    escape_html(&issue.title),
                    issue.number
                )
            } else {
                tracing::warn!(
                    issue = issue.number,
                    url = %issue.url,
                    "issue url is not http(s); not linked"
                );
                format!(
                    r#"<span class="{}" title="{}">#{}</span>"#,
                    issue.css_class(),
                    escape_html(&issue.title),
                    issue.number
                )
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
