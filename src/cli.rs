//! Command-line interface.
//!
//! A single-command front-end over the scanning core: parse the port
//! specification, run one batch against the target host, render the result.

use crate::error::{CliError, CliResult};
use crate::output;
use crate::scanner::{NetworkScanner, DEFAULT_CONCURRENCY};
use crate::types::PortSpec;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// mediascan - a lightweight TCP service reconnaissance tool.
///
/// Probes the given ports with bounded-timeout TCP connects, classifies
/// open ports against a well-known service table and grabs banners from
/// services it cannot classify.
#[derive(Parser, Debug)]
#[command(name = "mediascan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A lightweight TCP service reconnaissance tool", long_about = None)]
pub struct Cli {
    /// Target host (IP address or hostname)
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Ports to scan (e.g., "80", "80,443", "8000-8010"). Defaults to the
    /// well-known service ports when omitted.
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long, default_value = "2000")]
    pub timeout: u64,

    /// Maximum number of concurrent probes
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Show closed ports in plain output
    #[arg(long)]
    pub show_closed: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Cli {
    /// Execute the scan command.
    pub async fn execute(&self) -> CliResult<()> {
        let scanner = NetworkScanner::new()
            .with_timeout(Duration::from_millis(self.timeout))
            .with_concurrency(self.concurrency);

        let ports = match &self.ports {
            Some(spec) => {
                let ports = spec.parse::<PortSpec>()?.to_ports();
                if ports.is_empty() {
                    return Err(CliError::Other("no valid ports specified".to_string()));
                }
                Some(ports)
            }
            None => None,
        };

        let spinner = if self.output == OutputFormat::Plain {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}").unwrap());
            pb.enable_steady_tick(Duration::from_millis(80));
            pb.set_message(format!("Scanning {}...", self.host));
            Some(pb)
        } else {
            None
        };

        let result = match &ports {
            Some(ports) => scanner.scan_ports(&self.host, ports).await?,
            None => scanner.scan_common_ports(&self.host).await?,
        };

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        output::print_results(&result, self.output, self.show_closed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["mediascan", "10.0.0.1"]);
        assert_eq!(cli.host, "10.0.0.1");
        assert!(cli.ports.is_none());
        assert_eq!(cli.timeout, 2000);
        assert_eq!(cli.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(cli.output, OutputFormat::Plain);
        assert!(!cli.show_closed);
    }

    #[test]
    fn test_cli_port_spec() {
        let cli = Cli::parse_from(["mediascan", "cam.local", "-p", "554,8554-8560", "-o", "json"]);
        assert_eq!(cli.ports.as_deref(), Some("554,8554-8560"));
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
