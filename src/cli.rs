//! CLIインターフェース
//!
//! 運用操作はすべてAPI経由で行うため、フラグは-h/--helpと-V/--versionのみ。

use clap::Parser;

/// Service Monitor - Uptime monitor for registered network services
#[derive(Parser, Debug)]
#[command(name = "service-monitor")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    MONITOR_HOST              Bind address (default: 0.0.0.0)
    MONITOR_PORT              Listen port (default: 8000)
    MONITOR_LOG_LEVEL         Log level (default: info)
    MONITOR_DATABASE_URL      Database URL (default: sqlite:$HOME/.service-monitor/monitor.db)
    MONITOR_CHECK_INTERVAL    Check cycle interval in seconds (default: 300)
"#)]
pub struct Cli;
