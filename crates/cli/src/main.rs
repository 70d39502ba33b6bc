//! # ROM Analyzer CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 会话文件加载与验证
//! - 四个记录的活动范围分析
//! - 单个记录的对齐检查

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_analyze, run_inspect, run_validate};
use observability::ObservabilityConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "ROM Analyzer CLI starting"
    );

    // Execute command
    let result = match &cli.command {
        Commands::Analyze(args) => run_analyze(args).await,
        Commands::Inspect(args) => run_inspect(args).await,
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let config = ObservabilityConfig::from_verbosity(cli.log_format.into(), cli.verbose, cli.quiet);
    observability::init_with_config(config)
}
