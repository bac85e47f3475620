//! Connection probing.
//!
//! A probe is a single bounded-duration TCP connect. Ordinary transport
//! failures are absorbed here and reported as "closed"; only unexpected
//! socket errors (such as file descriptor exhaustion) propagate, since
//! masking those would fabricate "down" results.

use crate::error::Result;
use crate::types::Port;
use std::io;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Check whether a TCP port accepts connections.
///
/// Returns `Ok(true)` only if the connection is established before the
/// deadline. The connection is shut down gracefully before returning; no
/// data is exchanged.
pub async fn check_port(host: &str, port: Port, connect_timeout: Duration) -> Result<bool> {
    match timeout(connect_timeout, TcpStream::connect((host, port.as_u16()))).await {
        Ok(Ok(mut stream)) => {
            // Release the socket before reporting; nothing was written.
            let _ = stream.shutdown().await;
            trace!(host, %port, "port open");
            Ok(true)
        }
        Ok(Err(e)) if is_transport_failure(&e) => {
            trace!(host, %port, error = %e, "port closed");
            Ok(false)
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_) => {
            trace!(host, %port, "connect timed out");
            Ok(false)
        }
    }
}

/// Ordinary transport-level failures that mean "closed", not "broken".
///
/// Anything outside this set (fd exhaustion, permission errors) is fatal
/// for the batch.
pub(crate) fn is_transport_failure(e: &io::Error) -> bool {
    use io::ErrorKind::*;
    matches!(
        e.kind(),
        ConnectionRefused
            | ConnectionReset
            | ConnectionAborted
            | TimedOut
            | HostUnreachable
            | NetworkUnreachable
            | AddrNotAvailable
            | NotConnected
            | BrokenPipe
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    #[tokio::test]
    async fn test_open_port_detected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p = listener.local_addr().unwrap().port();

        let open = check_port("127.0.0.1", port(p), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(open);
    }

    #[tokio::test]
    async fn test_closed_port_detected() {
        // Bind then drop to get a port that is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p = listener.local_addr().unwrap().port();
        drop(listener);

        let open = check_port("127.0.0.1", port(p), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(!open);
    }

    #[tokio::test]
    async fn test_unroutable_host_times_out() {
        // TEST-NET-1 address, guaranteed unrouted.
        let open = check_port("192.0.2.1", port(80), Duration::from_millis(200))
            .await
            .unwrap();
        assert!(!open);
    }

    #[test]
    fn test_transport_failure_classification() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(is_transport_failure(&refused));
        let reset = io::Error::from(io::ErrorKind::ConnectionReset);
        assert!(is_transport_failure(&reset));
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(!is_transport_failure(&denied));
    }
}
