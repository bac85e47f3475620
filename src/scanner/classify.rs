//! Service classification for open ports.
//!
//! Classification consults the well-known port table first; the table hit
//! path performs no network I/O. Unlisted ports get a best-effort banner
//! grab: a fresh connection and a short passive read of whatever the remote
//! end sends unprompted.

use crate::error::Result;
use crate::scanner::probe::is_transport_failure;
use crate::services::{is_secure, lookup_service};
use crate::types::Port;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Timeout for the passive banner read, deliberately shorter than the
/// connect timeout. Not configurable.
const BANNER_TIMEOUT: Duration = Duration::from_secs(1);

/// Classification outcome for one open port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub service: String,
    pub protocol: &'static str,
    pub banner: String,
    pub secure: bool,
}

impl ServiceInfo {
    fn known(service: &str) -> Self {
        Self {
            service: service.to_string(),
            protocol: "tcp",
            banner: String::new(),
            secure: is_secure(service),
        }
    }

    fn unknown(banner: String) -> Self {
        Self {
            service: "unknown".to_string(),
            protocol: "tcp",
            banner,
            secure: false,
        }
    }
}

/// Identify the service behind an open port.
///
/// Table hits short-circuit without touching the network; misses fall back
/// to a banner grab bounded by [`BANNER_TIMEOUT`]. Connection failures on
/// the fallback path yield an unclassified result rather than an error.
pub async fn identify_service(
    host: &str,
    port: Port,
    connect_timeout: Duration,
) -> Result<ServiceInfo> {
    if let Some(name) = lookup_service(port) {
        return Ok(ServiceInfo::known(name));
    }

    let stream = match timeout(connect_timeout, TcpStream::connect((host, port.as_u16()))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) if is_transport_failure(&e) => {
            debug!(host, %port, error = %e, "banner connection failed");
            return Ok(ServiceInfo::unknown(String::new()));
        }
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => return Ok(ServiceInfo::unknown(String::new())),
    };

    let banner = grab_banner(stream).await;
    Ok(ServiceInfo::unknown(banner))
}

/// Passively read any greeting the server sends, then close the stream.
///
/// Read timeouts and read errors both yield an empty banner.
async fn grab_banner(mut stream: TcpStream) -> String {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    let banner = match timeout(BANNER_TIMEOUT, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => decode_banner(&buffer[..n]),
        _ => String::new(),
    };

    let _ = stream.shutdown().await;
    banner
}

/// Decode banner bytes permissively, dropping invalid sequences.
fn decode_banner(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    None => break,
                }
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    #[test]
    fn test_decode_clean_banner() {
        assert_eq!(decode_banner(b"SSH-2.0-OpenSSH_9.6\r\n"), "SSH-2.0-OpenSSH_9.6");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        assert_eq!(decode_banner(b"abc\xff\xfedef"), "abcdef");
        assert_eq!(decode_banner(b"\xff\xff"), "");
    }

    #[test]
    fn test_decode_truncated_multibyte_tail() {
        // A UTF-8 sequence cut off mid-character is dropped, not fatal.
        assert_eq!(decode_banner(b"ok\xe2\x82"), "ok");
    }

    #[tokio::test]
    async fn test_table_hit_is_deterministic_and_offline() {
        // An invalid hostname proves the table branch never dials out.
        let info = identify_service("host.invalid", port(80), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(info.service, "http");
        assert_eq!(info.protocol, "tcp");
        assert_eq!(info.banner, "");
        assert!(!info.secure);

        let again = identify_service("host.invalid", port(80), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(info, again);
    }

    #[tokio::test]
    async fn test_secure_table_hit() {
        let info = identify_service("host.invalid", port(8883), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(info.service, "mqtts");
        assert!(info.secure);
    }

    #[tokio::test]
    async fn test_banner_grab_from_greeting_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"220 smtp.example.com ESMTP\r\n").await.unwrap();
        });

        let info = identify_service("127.0.0.1", port(p), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(info.service, "unknown");
        assert_eq!(info.banner, "220 smtp.example.com ESMTP");
        assert!(!info.secure);
    }

    #[tokio::test]
    async fn test_silent_server_yields_empty_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            // Hold the connection open without sending anything.
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let info = identify_service("127.0.0.1", port(p), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(info.service, "unknown");
        assert_eq!(info.banner, "");
    }

    #[tokio::test]
    async fn test_connection_failure_yields_unknown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p = listener.local_addr().unwrap().port();
        drop(listener);

        let info = identify_service("127.0.0.1", port(p), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(info.service, "unknown");
        assert_eq!(info.banner, "");
        assert!(!info.secure);
    }
}
