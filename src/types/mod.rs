//! Core type definitions for scan results.

mod port;
mod service;

pub use port::{parse_ports, InvalidPortSpec, Port, PortRange, PortSpec};
pub use service::{NetworkService, ScanReport, ScanResult, ServiceRecord};
