//! Result model: per-port observations and the aggregate scan result.

use crate::types::Port;
use serde::Serialize;
use std::time::Duration;

/// One observation about one (host, port) pair.
///
/// Constructed exactly once per scanned port, after probing (and, for open
/// ports, classification) completes. Immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkService {
    /// The scanned address, hostname or IP literal, as given by the caller.
    pub host: String,
    /// The scanned port.
    pub port: Port,
    /// Classified service name, "unknown" when unclassified.
    pub service: String,
    /// Transport protocol. Always "tcp" for now; placeholder for UDP support.
    pub protocol: String,
    /// Best-effort banner text, possibly empty.
    pub banner: String,
    /// True iff the service name conventionally implies TLS ("https", "mqtts").
    pub is_secure: bool,
    /// True iff the connection attempt succeeded within the timeout.
    pub is_up: bool,
}

impl NetworkService {
    /// Observation for a closed or unreachable port.
    ///
    /// Classification never runs for closed ports, so every service field
    /// carries its default value.
    pub fn down(host: impl Into<String>, port: Port) -> Self {
        Self {
            host: host.into(),
            port,
            service: "unknown".to_string(),
            protocol: "tcp".to_string(),
            banner: String::new(),
            is_secure: false,
            is_up: false,
        }
    }

    /// Observation for an open port with its classification outcome.
    pub fn up(
        host: impl Into<String>,
        port: Port,
        service: impl Into<String>,
        banner: impl Into<String>,
        is_secure: bool,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            service: service.into(),
            protocol: "tcp".to_string(),
            banner: banner.into(),
            is_secure,
            is_up: true,
        }
    }
}

/// Aggregate result of one scan batch against a single host.
///
/// `services` is in completion order, not sorted by port. The derived counts
/// are computed at construction and fixed thereafter.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Per-port observations, one per requested port, in completion order.
    pub services: Vec<NetworkService>,
    /// Wall-clock time from batch start to batch completion.
    pub duration: Duration,
    /// Number of ports probed.
    pub total_ports: usize,
    /// Number of ports that accepted a connection.
    pub open_ports: usize,
}

impl ScanResult {
    /// Build a result from collected observations and the batch duration.
    pub fn new(services: Vec<NetworkService>, duration: Duration) -> Self {
        let total_ports = services.len();
        let open_ports = services.iter().filter(|s| s.is_up).count();
        Self {
            services,
            duration,
            total_ports,
            open_ports,
        }
    }

    /// Project into a plain serializable report.
    ///
    /// The report lists open ports only; presence in `services` implies the
    /// port was up, so no `is_up` field is carried.
    pub fn to_report(&self) -> ScanReport {
        ScanReport {
            duration: self.duration.as_secs_f64(),
            total_ports: self.total_ports,
            open_ports: self.open_ports,
            services: self
                .services
                .iter()
                .filter(|s| s.is_up)
                .map(ServiceRecord::from)
                .collect(),
        }
    }
}

/// Serializable view of a [`ScanResult`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub duration: f64,
    pub total_ports: usize,
    pub open_ports: usize,
    pub services: Vec<ServiceRecord>,
}

/// One open-port record inside a [`ScanReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecord {
    pub ip: String,
    pub port: u16,
    pub service: String,
    pub protocol: String,
    pub is_secure: bool,
    pub banner: String,
}

impl From<&NetworkService> for ServiceRecord {
    fn from(s: &NetworkService) -> Self {
        Self {
            ip: s.host.clone(),
            port: s.port.as_u16(),
            service: s.service.clone(),
            protocol: s.protocol.clone(),
            is_secure: s.is_secure,
            banner: s.banner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    #[test]
    fn test_down_service_defaults() {
        let svc = NetworkService::down("127.0.0.1", port(9999));
        assert!(!svc.is_up);
        assert_eq!(svc.service, "unknown");
        assert_eq!(svc.protocol, "tcp");
        assert_eq!(svc.banner, "");
        assert!(!svc.is_secure);
    }

    #[test]
    fn test_result_counts() {
        let services = vec![
            NetworkService::up("h", port(80), "http", "", false),
            NetworkService::down("h", port(81)),
            NetworkService::up("h", port(443), "https", "", true),
        ];
        let result = ScanResult::new(services, Duration::from_millis(120));
        assert_eq!(result.total_ports, 3);
        assert_eq!(result.open_ports, 2);
    }

    #[test]
    fn test_report_filters_to_open_ports() {
        let services = vec![
            NetworkService::up("h", port(80), "http", "", false),
            NetworkService::down("h", port(81)),
        ];
        let result = ScanResult::new(services, Duration::from_millis(50));
        let report = result.to_report();
        assert_eq!(report.total_ports, 2);
        assert_eq!(report.open_ports, 1);
        assert_eq!(report.services.len(), 1);
        assert_eq!(report.services[0].port, 80);
        assert_eq!(report.services[0].ip, "h");
    }

    #[test]
    fn test_report_serializes() {
        let result = ScanResult::new(
            vec![NetworkService::up("h", port(8883), "mqtts", "", true)],
            Duration::from_secs(1),
        );
        let json = serde_json::to_value(result.to_report()).unwrap();
        assert_eq!(json["open_ports"], 1);
        assert_eq!(json["services"][0]["service"], "mqtts");
        assert_eq!(json["services"][0]["is_secure"], true);
        assert!(json["services"][0].get("is_up").is_none());
    }
}
