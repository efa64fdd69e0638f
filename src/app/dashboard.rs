use crate::app::render::{self, ChartKind};
use crate::config::DashboardConfig;
use crate::core::aggregator::LocationAggregator;
use crate::core::timeline::TimelineFetcher;
use crate::domain::ports::CaseDataSource;
use crate::utils::error::{DashError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "commands: bar | scatter | table | top | country <CODE> | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub chart: ChartKind,
    pub top_clicks: u32,
    pub country_code: String,
    pub top_n: usize,
    pub chart_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ChartSelect(ChartKind),
    ShowTop,
    CountryCode(String),
    Quit,
}

impl UiEvent {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("top") => Ok(UiEvent::ShowTop),
            Some("quit") | Some("exit") => Ok(UiEvent::Quit),
            Some("country") => parts
                .next()
                .map(|code| UiEvent::CountryCode(code.to_string()))
                .ok_or_else(|| "country needs a code, e.g. `country US`".to_string()),
            Some(other) => other.parse().map(UiEvent::ChartSelect),
            None => Err(HELP.to_string()),
        }
    }
}

/// Owns the UI state and answers each event with the panel to show.
pub struct Dashboard<D: CaseDataSource> {
    aggregator: LocationAggregator<D>,
    timelines: TimelineFetcher<D>,
    state: DashboardState,
}

impl<D: CaseDataSource + Clone> Dashboard<D> {
    pub fn new(source: D, config: &DashboardConfig) -> Self {
        Self {
            aggregator: LocationAggregator::new(source.clone()),
            timelines: TimelineFetcher::with_order(source, config.display.timeline_order),
            state: DashboardState {
                chart: config.display.default_view,
                top_clicks: 0,
                country_code: config.display.default_country_code.clone(),
                top_n: config.display.top_n,
                chart_width: config.display.chart_width,
            },
        }
    }
}

impl<D: CaseDataSource> Dashboard<D> {
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub async fn on_chart_select(&mut self, chart: ChartKind) -> String {
        self.state.chart = chart;
        self.summary_panel().await
    }

    /// `n_clicks` is the running click count; any click keeps the view truncated.
    pub async fn on_show_top(&mut self, n_clicks: u32) -> String {
        self.state.top_clicks = n_clicks;
        self.summary_panel().await
    }

    pub async fn on_country_code_change(&mut self, country_code: &str) -> String {
        self.state.country_code = country_code.to_string();
        self.timeline_panel().await
    }

    /// Returns `None` once the user quits.
    pub async fn handle(&mut self, event: UiEvent) -> Option<String> {
        match event {
            UiEvent::ChartSelect(chart) => Some(self.on_chart_select(chart).await),
            UiEvent::ShowTop => {
                let clicks = self.state.top_clicks.saturating_add(1);
                Some(self.on_show_top(clicks).await)
            }
            UiEvent::CountryCode(code) => Some(self.on_country_code_change(&code).await),
            UiEvent::Quit => None,
        }
    }

    pub async fn summary_panel(&self) -> String {
        match self.aggregator.fetch_country_summaries().await {
            Ok(mut summaries) => {
                if self.state.top_clicks > 0 {
                    summaries.truncate(self.state.top_n);
                }
                render::render_summaries(self.state.chart, &summaries, self.state.chart_width)
            }
            Err(e) => error_panel(&e),
        }
    }

    pub async fn timeline_panel(&self) -> String {
        match self.timelines.fetch_timeline(&self.state.country_code).await {
            Ok(points) => {
                render::render_timeline(&self.state.country_code, &points, self.state.chart_width)
            }
            Err(e) => error_panel(&e),
        }
    }
}

fn error_panel(error: &DashError) -> String {
    tracing::warn!("{} ({:?})", error, error.category());
    format!(
        "error: {}\nhint: {}\n",
        error.user_friendly_message(),
        error.recovery_suggestion()
    )
}

/// Renders the initial panels, then one panel per input line until `quit` or end of input.
pub async fn run_interactive<D, R, W>(
    dashboard: &mut Dashboard<D>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    D: CaseDataSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let timeline = dashboard.timeline_panel().await;
    let summary = dashboard.summary_panel().await;
    writer.write_all(timeline.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.write_all(summary.as_bytes()).await?;
    writer.write_all(format!("\n{}\n", HELP).as_bytes()).await?;
    writer.flush().await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let panel = match UiEvent::parse(&line) {
            Ok(event) => match dashboard.handle(event).await {
                Some(panel) => panel,
                None => break,
            },
            Err(message) => format!("{}\n", message),
        };

        writer.write_all(panel.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LatestCounts, LocationRecord, LocationTimelines};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MockSource {
        calls: Arc<AtomicUsize>,
    }

    fn record(country: &str, confirmed: u64) -> LocationRecord {
        LocationRecord {
            id: None,
            country: country.to_string(),
            country_code: None,
            province: None,
            latest: Some(LatestCounts {
                confirmed,
                deaths: 0,
                recovered: 0,
            }),
            timelines: None,
        }
    }

    #[async_trait]
    impl CaseDataSource for MockSource {
        async fn locations(&self) -> Result<Vec<LocationRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..15u64).map(|i| record(&format!("C{:02}", i), 100 - i)).collect())
        }

        async fn locations_by_country_code(&self, country_code: &str) -> Result<Vec<LocationRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if country_code != "US" {
                return Ok(Vec::new());
            }
            let timelines: LocationTimelines = serde_json::from_value(serde_json::json!({
                "confirmed": {"timeline": {"2020-01-22T00:00:00Z": 1}},
                "deaths": {"timeline": {"2020-01-22T00:00:00Z": 0}}
            }))
            .unwrap();
            let mut location = record("US", 1);
            location.timelines = Some(timelines);
            Ok(vec![location])
        }
    }

    fn dashboard() -> Dashboard<MockSource> {
        Dashboard::new(MockSource::default(), &DashboardConfig::default())
    }

    #[test]
    fn test_parse_events() {
        assert_eq!(UiEvent::parse("table"), Ok(UiEvent::ChartSelect(ChartKind::Table)));
        assert_eq!(UiEvent::parse("top"), Ok(UiEvent::ShowTop));
        assert_eq!(
            UiEvent::parse("country fr"),
            Ok(UiEvent::CountryCode("fr".to_string()))
        );
        assert_eq!(UiEvent::parse("quit"), Ok(UiEvent::Quit));
        assert!(UiEvent::parse("country").is_err());
        assert!(UiEvent::parse("pie").is_err());
    }

    #[tokio::test]
    async fn test_show_top_truncates_to_ten_rows() {
        let mut dashboard = dashboard();

        let full = dashboard.on_chart_select(ChartKind::Table).await;
        assert_eq!(full.lines().count(), 2 + 15);

        let top = dashboard.on_show_top(1).await;
        assert_eq!(top.lines().count(), 2 + 10);
        assert!(top.contains("C09"));
        assert!(!top.contains("C10"));

        // the chart choice survives the click
        assert_eq!(dashboard.state().chart, ChartKind::Table);
    }

    #[tokio::test]
    async fn test_each_event_makes_one_call() {
        let source = MockSource::default();
        let calls = source.calls.clone();
        let mut dashboard = Dashboard::new(source, &DashboardConfig::default());

        dashboard.handle(UiEvent::ChartSelect(ChartKind::Bar)).await;
        dashboard.handle(UiEvent::ShowTop).await;
        dashboard
            .handle(UiEvent::CountryCode("US".to_string()))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(dashboard.state().top_clicks, 1);
    }

    #[tokio::test]
    async fn test_unknown_country_renders_error_and_keeps_running() {
        let mut dashboard = dashboard();

        let panel = dashboard.on_country_code_change("ZZ").await;
        assert!(panel.starts_with("error: No data found for country code 'ZZ'"));

        let panel = dashboard.on_country_code_change("US").await;
        assert!(panel.starts_with("Showing: US"));
    }

    #[test]
    fn test_interactive_session() {
        let mut dashboard = dashboard();
        let input: &[u8] = b"scatter\n\nbogus\ncountry US\nquit\ntable\n";
        let mut output: Vec<u8> = Vec::new();

        tokio_test::block_on(run_interactive(&mut dashboard, input, &mut output)).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Showing: US"));
        assert!(output.contains("unknown chart type 'bogus'"));
        assert_eq!(output.matches("Showing: US").count(), 2);
        assert_eq!(dashboard.state().chart, ChartKind::Scatter);
        assert!(!output.contains("country  confirmed  deaths"));
    }
}
