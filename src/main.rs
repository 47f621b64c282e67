use clap::Parser;
use customer_etl::utils::{logger, validation::Validate};
use customer_etl::{CliConfig, CustomerPipeline, EtlEngine, EtlError, LocalStorage, RunConfig};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting customer-etl");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match RunConfig::from_cli(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Effective config: {:?}", config);

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let dry_run = config.dry_run;
    let monitor_enabled = config.monitor;

    // 創建存儲和管道
    let storage = LocalStorage::new(".");
    let pipeline = CustomerPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = if dry_run {
        engine.dry_run()
    } else {
        engine.run()
    };

    match outcome {
        Ok(summary) if dry_run => {
            println!("{}", summary.dry_run_line());
        }
        Ok(summary) => {
            tracing::info!(
                "✅ ETL process completed: {} written, {} excluded",
                summary.records_written,
                summary.rows_dropped
            );
            println!("{}", summary.status_line());
        }
        Err(e) => fail(e),
    }
}

fn fail(e: EtlError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
