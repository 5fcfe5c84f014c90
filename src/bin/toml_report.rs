use chrono::NaiveDate;
use clap::Parser;
use pair_analyzer::utils::{logger, validation::Validate};
use pair_analyzer::{AnalysisEngine, CsvPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Pair analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the as-of date from config
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based pair analysis");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(as_of) = args.as_of {
        config.input.as_of = Some(as_of.format("%Y-%m-%d").to_string());
        tracing::info!("🔧 As-of date overridden to: {}", as_of);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output.path.clone());
    let pipeline = CsvPipeline::new(storage, config);

    // 創建分析引擎並運行
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Analysis completed successfully!");
            tracing::info!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                pair_analyzer::utils::error::ErrorSeverity::Low => 0,
                pair_analyzer::utils::error::ErrorSeverity::Medium => 2,
                pair_analyzer::utils::error::ErrorSeverity::High => 1,
                pair_analyzer::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Report: {} v{}",
        config.report.name, config.report.version
    );
    println!("  Input: {}", config.input.path);
    println!("  Output: {}", config.output.path);
    println!("  Formats: {}", config.output.formats.join(", "));

    if let Some(as_of) = &config.input.as_of {
        println!("  As-of date: {}", as_of);
    } else {
        println!("  As-of date: today");
    }

    println!("  Monitoring: {}", config.monitoring_enabled());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Input Analysis:");
    println!("  File: {}", config.input.path);
    match std::fs::metadata(&config.input.path) {
        Ok(meta) => println!("  Exists: yes ({} bytes)", meta.len()),
        Err(_) => println!("  Exists: NO - the run would fail"),
    }

    println!();
    println!("⚙️ Processing:");
    println!("  Group assignments by project, accumulate pairwise overlap days");
    if let Some(as_of) = &config.input.as_of {
        println!("  Open-ended periods resolve to {}", as_of);
    } else {
        println!("  Open-ended periods resolve to today");
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output.path);
    println!("  Formats: {}", config.output.formats.join(", "));

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
