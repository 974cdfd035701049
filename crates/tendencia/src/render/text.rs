use crate::report::{DashboardReport, QuestionSection};

use super::{
    Artifact, BarChartSpec, NoticeKind, PieChartSpec, ScatterChartSpec, TableSpec,
};

#[must_use]
pub fn render_report(report: &DashboardReport) -> String {
    let mut lines = vec![
        format!("schema_version: {}", report.schema_version),
        format!("generated_at_utc: {}", report.generated_at_utc),
        format!("database: {}", report.database),
        format!("schema: {}", report.schema),
    ];

    for section in &report.questions {
        lines.push(String::new());
        lines.extend(render_section_lines(section));
    }

    lines.join("\n")
}

#[must_use]
pub fn render_section_lines(section: &QuestionSection) -> Vec<String> {
    let mut lines = vec![
        format!("question {}: {}", section.number, section.title),
        format!("source_view: {}", section.source_view),
        format!("status: {}", section.status.as_str()),
    ];

    for artifact in &section.artifacts {
        lines.extend(render_artifact_lines(artifact));
    }

    if let Some(error) = &section.error {
        lines.push(format!("error: {error}"));
    }

    lines
}

#[must_use]
pub fn render_artifact_lines(artifact: &Artifact) -> Vec<String> {
    match artifact {
        Artifact::BarChart(spec) => render_bar_chart(spec),
        Artifact::PieChart(spec) => render_pie_chart(spec),
        Artifact::ScatterChart(spec) => render_scatter_chart(spec),
        Artifact::Table(spec) => render_table(spec),
        Artifact::Notice(spec) => vec![
            format!("notice.kind: {}", notice_kind_key(spec.notice_kind)),
            format!("notice.message: {}", spec.message),
        ],
        Artifact::Summary(spec) => vec![format!("summary: {}", spec.sentence)],
    }
}

fn render_bar_chart(spec: &BarChartSpec) -> Vec<String> {
    let mut lines = vec![
        format!("bar_chart: {}", spec.title),
        format!("axes: x={} y={}", spec.x_label, spec.y_label),
    ];
    lines.extend(spec.bars.iter().map(|bar| {
        format!(
            "- {} value={} color={}",
            bar.label,
            spec.value_format.render(bar.value),
            bar.color
        )
    }));
    lines
}

fn render_pie_chart(spec: &PieChartSpec) -> Vec<String> {
    let total = spec.total();
    let mut lines = vec![format!("pie_chart: {}", spec.title)];
    for slice in &spec.slices {
        let share = if total > 0.0 {
            slice.value / total * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "- {} value={} share={share:.1}% color={}",
            slice.label, slice.value, slice.color
        ));
    }
    lines
}

fn render_scatter_chart(spec: &ScatterChartSpec) -> Vec<String> {
    let mut lines = vec![
        format!("scatter_chart: {}", spec.title),
        format!("axes: x={} y={}", spec.x_label, spec.y_label),
    ];
    if !spec.series.is_empty() {
        let legend = spec
            .series
            .iter()
            .map(|series| format!("{}={}", series.label, series.color))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!("series: {legend}"));
    }
    lines.extend(
        spec.points
            .iter()
            .map(|point| format!("- series={} x={} y={}", point.series, point.x, point.y)),
    );
    if let Some(annotation) = &spec.annotation {
        lines.push(format!(
            "annotation: x={} y={} {}",
            annotation.x, annotation.y, annotation.text
        ));
    }
    lines
}

fn render_table(spec: &TableSpec) -> Vec<String> {
    let mut lines = vec![
        format!("table: {}", spec.title),
        format!("columns: {}", spec.columns.join(" | ")),
    ];
    for (index, row) in spec.rows.iter().enumerate() {
        let mut line = format!("- {}", row.join(" | "));
        if let Some(highlight) = spec
            .highlights
            .iter()
            .find(|highlight| highlight.row_index == index)
        {
            line.push_str(&format!(" color={}", highlight.color));
        }
        lines.push(line);
    }
    lines
}

const fn notice_kind_key(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::EmptyResult => "empty_result",
        NoticeKind::NoHighExposure => "no_high_exposure",
    }
}
