//! Plain-text rendering of summaries and timelines.

use crate::domain::model::{CountrySummary, TimelinePoint};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

const CONFIRMED_BAR: char = '█';
const DEATHS_BAR: char = '▒';
const CONFIRMED_MARK: char = 'o';
const DEATHS_MARK: char = 'x';
const OVERLAP_MARK: char = '*';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ChartKind {
    #[default]
    Bar,
    Scatter,
    Table,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "scatter" | "sca" => Ok(ChartKind::Scatter),
            "table" => Ok(ChartKind::Table),
            other => Err(format!("unknown chart type '{}'", other)),
        }
    }
}

fn scale(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * width as f64).round() as usize
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|label| label.chars().count()).max().unwrap_or(0)
}

fn legend() -> String {
    format!(
        "{} confirmed   {} deaths\n",
        CONFIRMED_MARK, DEATHS_MARK
    )
}

/// Places both markers on one axis line.
fn marker_line(confirmed: u64, deaths: u64, max: u64, width: usize) -> String {
    let mut line = vec![' '; width + 1];
    let confirmed_at = scale(confirmed, max, width);
    let deaths_at = scale(deaths, max, width);
    line[deaths_at] = DEATHS_MARK;
    line[confirmed_at] = if confirmed_at == deaths_at {
        OVERLAP_MARK
    } else {
        CONFIRMED_MARK
    };
    line.into_iter().collect::<String>().trim_end().to_string()
}

pub fn render_summaries(kind: ChartKind, summaries: &[CountrySummary], width: usize) -> String {
    match kind {
        ChartKind::Bar => render_bar_chart(summaries, width),
        ChartKind::Scatter => render_scatter_chart(summaries, width),
        ChartKind::Table => render_table(summaries),
    }
}

/// Grouped horizontal bars, confirmed above deaths for each country.
pub fn render_bar_chart(summaries: &[CountrySummary], width: usize) -> String {
    let max = summaries
        .iter()
        .map(|s| s.confirmed.max(s.deaths))
        .max()
        .unwrap_or(0);
    let pad = label_width(summaries.iter().map(|s| s.country.as_str()));

    let mut out = format!("{} confirmed   {} deaths\n", CONFIRMED_BAR, DEATHS_BAR);
    for summary in summaries {
        let confirmed_bar: String =
            std::iter::repeat(CONFIRMED_BAR).take(scale(summary.confirmed, max, width)).collect();
        let deaths_bar: String =
            std::iter::repeat(DEATHS_BAR).take(scale(summary.deaths, max, width)).collect();
        let _ = writeln!(
            out,
            "{:<pad$} |{} {}",
            summary.country, confirmed_bar, summary.confirmed
        );
        let _ = writeln!(out, "{:<pad$} |{} {}", "", deaths_bar, summary.deaths);
    }
    out
}

pub fn render_scatter_chart(summaries: &[CountrySummary], width: usize) -> String {
    let max = summaries
        .iter()
        .map(|s| s.confirmed.max(s.deaths))
        .max()
        .unwrap_or(0);
    let pad = label_width(summaries.iter().map(|s| s.country.as_str()));

    let mut out = legend();
    for summary in summaries {
        let _ = writeln!(
            out,
            "{:<pad$} |{}",
            summary.country,
            marker_line(summary.confirmed, summary.deaths, max, width)
        );
    }
    out
}

pub fn render_table(summaries: &[CountrySummary]) -> String {
    let confirmed: Vec<String> = summaries.iter().map(|s| s.confirmed.to_string()).collect();
    let deaths: Vec<String> = summaries.iter().map(|s| s.deaths.to_string()).collect();

    let country_w = label_width(summaries.iter().map(|s| s.country.as_str())).max("country".len());
    let confirmed_w = label_width(confirmed.iter().map(String::as_str)).max("confirmed".len());
    let deaths_w = label_width(deaths.iter().map(String::as_str)).max("deaths".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<country_w$}  {:>confirmed_w$}  {:>deaths_w$}",
        "country", "confirmed", "deaths"
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(country_w),
        "-".repeat(confirmed_w),
        "-".repeat(deaths_w)
    );
    for (i, summary) in summaries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<country_w$}  {:>confirmed_w$}  {:>deaths_w$}",
            summary.country, confirmed[i], deaths[i]
        );
    }
    out
}

/// Two-series chart, one row per date in the order given.
pub fn render_timeline(country_code: &str, points: &[TimelinePoint], width: usize) -> String {
    let max = points
        .iter()
        .map(|p| p.confirmed.max(p.deaths))
        .max()
        .unwrap_or(0);
    let pad = label_width(points.iter().map(|p| p.date.as_str()));

    let mut out = format!("Showing: {}\n", country_code);
    out.push_str(&legend());
    for point in points {
        let _ = writeln!(
            out,
            "{:<pad$} |{}",
            point.date,
            marker_line(point.confirmed, point.deaths, max, width)
        );
    }
    if let Some(last) = points.last() {
        let _ = writeln!(
            out,
            "latest {}: confirmed {}, deaths {}",
            last.date, last.confirmed, last.deaths
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<CountrySummary> {
        vec![
            CountrySummary {
                country: "FR".to_string(),
                confirmed: 20,
                deaths: 2,
            },
            CountrySummary {
                country: "US".to_string(),
                confirmed: 10,
                deaths: 10,
            },
        ]
    }

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("sca".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
        assert_eq!(" Table ".parse::<ChartKind>().unwrap(), ChartKind::Table);
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_bar_chart_scales_to_width() {
        let out = render_bar_chart(&summaries(), 10);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "FR |██████████ 20");
        assert_eq!(lines[2], "   |▒ 2");
        assert_eq!(lines[3], "US |█████ 10");
        assert_eq!(lines[4], "   |▒▒▒▒▒ 10");
    }

    #[test]
    fn test_scatter_marks_overlap() {
        let out = render_scatter_chart(&summaries(), 10);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "FR | x        o");
        assert_eq!(lines[2], "US |     *");
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = render_table(&summaries());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "country  confirmed  deaths");
        assert_eq!(lines[2], "FR              20       2");
        assert_eq!(lines[3], "US              10      10");
    }

    #[test]
    fn test_empty_inputs_render_headers_only() {
        assert_eq!(render_bar_chart(&[], 10).lines().count(), 1);
        assert_eq!(render_table(&[]).lines().count(), 2);
        assert_eq!(render_timeline("ZZ", &[], 10), "Showing: ZZ\no confirmed   x deaths\n");
    }

    #[test]
    fn test_timeline_keeps_point_order() {
        let points = vec![
            TimelinePoint {
                date: "2020-01-01".to_string(),
                confirmed: 1,
                deaths: 0,
            },
            TimelinePoint {
                date: "2020-01-02".to_string(),
                confirmed: 4,
                deaths: 1,
            },
        ];

        let out = render_timeline("FR", &points, 4);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Showing: FR");
        assert_eq!(lines[2], "2020-01-01 |xo");
        assert_eq!(lines[3], "2020-01-02 | x  o");
        assert_eq!(lines[4], "latest 2020-01-02: confirmed 4, deaths 1");
    }
}
