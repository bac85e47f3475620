//! Service classification based on well-known port numbers.
//!
//! Provides the static mapping from canonical service names to the ports
//! conventionally associated with them, plus the TLS heuristic.

use crate::types::Port;

/// Well-known services and their canonical ports.
///
/// Declaration order is the tie-break: if a port ever appeared under two
/// names, the first-listed entry wins.
pub const SERVICE_PORTS: &[(&str, &[u16])] = &[
    ("rtsp", &[554, 8554]),
    ("http", &[80, 8080, 8000, 8888]),
    ("https", &[443, 8443]),
    ("ssh", &[22]),
    ("vnc", &[5900, 5901]),
    ("rdp", &[3389]),
    ("mqtt", &[1883]),
    ("mqtts", &[8883]),
];

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn lookup_service(port: Port) -> Option<&'static str> {
    let port = port.as_u16();
    SERVICE_PORTS
        .iter()
        .find(|(_, ports)| ports.contains(&port))
        .map(|(name, _)| *name)
}

/// Whether a service name conventionally implies a TLS-wrapped protocol.
///
/// Heuristic: the name ends in "s" (https, mqtts).
pub fn is_secure(service: &str) -> bool {
    service.ends_with('s')
}

/// All well-known ports, flattened in table declaration order.
///
/// Used by `scan_common_ports` to fan the table out into one batch.
pub fn common_ports() -> Vec<Port> {
    SERVICE_PORTS
        .iter()
        .flat_map(|(_, ports)| ports.iter().copied())
        .map(Port::new_unchecked)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(lookup_service(port(22)), Some("ssh"));
        assert_eq!(lookup_service(port(80)), Some("http"));
        assert_eq!(lookup_service(port(8000)), Some("http"));
        assert_eq!(lookup_service(port(443)), Some("https"));
        assert_eq!(lookup_service(port(554)), Some("rtsp"));
        assert_eq!(lookup_service(port(8883)), Some("mqtts"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(lookup_service(port(9999)), None);
        assert_eq!(lookup_service(port(12345)), None);
    }

    #[test]
    fn test_secure_heuristic() {
        assert!(is_secure("https"));
        assert!(is_secure("mqtts"));
        assert!(!is_secure("http"));
        assert!(!is_secure("mqtt"));
        assert!(!is_secure("rdp"));
        assert!(!is_secure("rtsp"));
    }

    #[test]
    fn test_common_ports_flattening() {
        let ports = common_ports();
        assert_eq!(ports.len(), 14);
        // Declaration order preserved
        assert_eq!(ports[0].as_u16(), 554);
        assert_eq!(ports[1].as_u16(), 8554);
        assert!(ports.contains(&port(22)));
        assert!(ports.contains(&port(8883)));
    }
}
