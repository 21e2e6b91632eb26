use clap::Parser;
use police_engagement::utils::{logger, validation::Validate};
use police_engagement::{CliConfig, ConfigProvider, EngagementPipeline, PoliceApiError, SearchEngine};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting police-engagement CLI");

    let exit_code = match cli.load_file_config() {
        Some(Ok(file_config)) => {
            tracing::info!("📁 Loaded configuration file");
            let monitor = file_config.monitoring_enabled();
            run(file_config, monitor).await
        }
        Some(Err(e)) => {
            report_error(&e);
            e.exit_code()
        }
        None => {
            let monitor = cli.monitor;
            run(cli, monitor).await
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

async fn run<C>(config: C, monitor_enabled: bool) -> i32
where
    C: ConfigProvider + Validate + std::fmt::Debug,
{
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return e.exit_code();
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = match EngagementPipeline::from_config(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            report_error(&e);
            return e.exit_code();
        }
    };
    let engine = SearchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!(
                "police forces that have {}: \n{}",
                outcome.engagement_method,
                outcome.report
            );
            tracing::info!(
                "✅ {} of {} forces matched",
                outcome.matching_forces.len(),
                outcome.forces_listed
            );
            0
        }
        Err(e) => {
            report_error(&e);
            e.exit_code()
        }
    }
}

fn report_error(e: &PoliceApiError) {
    tracing::error!("❌ {}", e.summary());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
}
