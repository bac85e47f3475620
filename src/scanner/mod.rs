//! Scan orchestration.
//!
//! Drives concurrent probing of a port set against one host, classifying
//! open ports and aggregating everything into a single timed [`ScanResult`].
//! Units run independently with per-unit timeouts; the gather step waits for
//! every unit unconditionally before surfacing any fatal error.

pub mod classify;
pub mod probe;

use crate::error::Result;
use crate::services;
use crate::types::{NetworkService, Port, ScanResult};
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use classify::{identify_service, ServiceInfo};
pub use probe::check_port;

/// Default per-port connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default bound on simultaneous probes. One task per port is launched, but
/// at most this many are connecting at once so very large ranges cannot
/// exhaust file descriptors.
pub const DEFAULT_CONCURRENCY: usize = 512;

/// Asynchronous TCP connect scanner. Requires no privileges.
///
/// # Example
///
/// ```rust,ignore
/// use mediascan::scanner::NetworkScanner;
/// use mediascan::types::parse_ports;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let scanner = NetworkScanner::new();
///     let ports = parse_ports("22,80,443,8000-8010")?;
///     let result = scanner.scan_ports("192.168.1.10", &ports).await?;
///     println!("{} of {} ports open", result.open_ports, result.total_ports);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NetworkScanner {
    timeout: Duration,
    concurrency: usize,
}

impl Default for NetworkScanner {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl NetworkScanner {
    /// Create a scanner with default timeout and concurrency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-port connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of simultaneous probes.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Get the configured connect timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single port and, if it is open, classify the service.
    ///
    /// Closed ports carry defaulted service fields; classification never
    /// runs for them.
    pub async fn scan_port(&self, host: &str, port: Port) -> Result<NetworkService> {
        if !probe::check_port(host, port, self.timeout).await? {
            return Ok(NetworkService::down(host, port));
        }

        let info = classify::identify_service(host, port, self.timeout).await?;
        debug!(host, %port, service = %info.service, "open port classified");
        Ok(NetworkService::up(
            host,
            port,
            info.service,
            info.banner,
            info.secure,
        ))
    }

    /// Scan a collection of ports concurrently.
    ///
    /// One unit is launched per requested port, duplicates included; every
    /// unit yields exactly one [`NetworkService`]. Results are collected in
    /// completion order and the whole batch is timed with a single
    /// wall-clock measurement.
    pub async fn scan_ports(&self, host: &str, ports: &[Port]) -> Result<ScanResult> {
        let start = Instant::now();

        let outcomes: Vec<Result<NetworkService>> = stream::iter(ports.iter().copied())
            .map(|port| self.scan_port(host, port))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // All units have finished and released their sockets; only now may
        // a fatal error short-circuit.
        let services = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
        let duration = start.elapsed();

        let result = ScanResult::new(services, duration);
        info!(
            host,
            total = result.total_ports,
            open = result.open_ports,
            elapsed_ms = duration.as_millis() as u64,
            "scan complete"
        );
        Ok(result)
    }

    /// Scan every port in the well-known service table.
    pub async fn scan_common_ports(&self, host: &str) -> Result<ScanResult> {
        self.scan_ports(host, &services::common_ports()).await
    }
}
