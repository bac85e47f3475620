//! # mediascan - A Lightweight TCP Service Reconnaissance Tool
//!
//! mediascan determines which TCP ports on a host accept connections,
//! classifies the likely service on each open port using a table of
//! well-known ports and opportunistically captures a short text banner for
//! ports it cannot classify.
//!
//! ## Features
//!
//! - **Concurrent Probing**: async connect scans with a configurable
//!   concurrency bound and per-port timeouts
//! - **Service Classification**: static well-known-port table covering
//!   media and remote-access services (rtsp, http(s), ssh, vnc, rdp, mqtt(s))
//! - **Banner Grabbing**: passive short-lived read from unclassified ports
//! - **Multiple Output Formats**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use mediascan::scanner::NetworkScanner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scanner = NetworkScanner::new();
//!     let result = scanner.scan_common_ports("192.168.1.10").await?;
//!
//!     for svc in result.services.iter().filter(|s| s.is_up) {
//!         println!("{}: {} ({})", svc.port, svc.service, svc.banner);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`types`] - Core type definitions: validated ports, port
//!   specifications and the scan result model
//! - [`scanner`] - The probing, classification and orchestration engine
//! - [`services`] - The well-known service table
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities

pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use scanner::NetworkScanner;
pub use types::{parse_ports, InvalidPortSpec, NetworkService, Port, PortSpec, ScanResult};
