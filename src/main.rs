use clap::Parser;
use covid_dash::app::render;
use covid_dash::core::ConfigProvider;
use covid_dash::utils::error::ErrorSeverity;
use covid_dash::utils::{logger, validation::Validate};
use covid_dash::{
    run_interactive, CliConfig, Command, Dashboard, DashboardConfig, ExportEngine, ExportOptions,
    ExportPipeline, LocalStorage, LocationAggregator, Result, TimelineFetcher, TrackerApiClient,
};
use std::sync::Arc;

async fn run(cli: &CliConfig, config: DashboardConfig) -> Result<()> {
    let source = Arc::new(TrackerApiClient::from_config(&config)?);
    let width = config.display.chart_width;

    match &cli.command {
        Command::Summary { top, .. } => {
            let mut summaries = LocationAggregator::new(source)
                .fetch_country_summaries()
                .await?;
            if *top {
                summaries.truncate(config.display.top_n);
            }
            print!(
                "{}",
                render::render_summaries(config.display.default_view, &summaries, width)
            );
        }
        Command::Timeline { country_code, .. } => {
            let points = TimelineFetcher::with_order(source, config.display.timeline_order)
                .fetch_timeline(country_code)
                .await?;
            print!("{}", render::render_timeline(country_code, &points, width));
        }
        Command::Export {
            country_code, top, ..
        } => {
            let storage = LocalStorage::new(config.output_path().to_string());
            let pipeline = ExportPipeline::new(
                storage,
                source,
                ExportOptions {
                    output_path: config.output_path().to_string(),
                    country_code: country_code.clone(),
                    top_n: *top,
                    order: config.display.timeline_order,
                },
            );
            let output_path = ExportEngine::new(pipeline).run().await?;
            println!("📁 Output saved to: {}", output_path);
        }
        Command::Interactive => {
            let mut dashboard = Dashboard::new(source, &config);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_interactive(&mut dashboard, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Using {} (source: {})",
        config.api_endpoint(),
        config.data_source()
    );

    if let Err(e) = run(&cli, config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4, // nothing matched the request
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
