// tests/tls_test.rs

use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use vanguard_takeover::core::scanner::http_scanner::run_http_probe;
use vanguard_takeover::{NetworkProber, Prober, ScanConfig};

const BODY: &str = "There isn't a GitHub Pages site here.";

/// Serves a fixed 404 page over TLS with a self-signed certificate issued for
/// a name that never matches the address the client dials.
async fn self_signed_server() -> SocketAddr {
    let certified = rcgen::generate_simple_self_signed(vec!["wrong.invalid".to_string()]).unwrap();
    let cert = certified.cert.der().clone();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));

    let config = rustls::ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![cert], key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { return };
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(mut tls) = acceptor.accept(stream).await else { return };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    BODY.len(),
                    BODY
                );
                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    addr
}

fn config(verify_tls: bool) -> ScanConfig {
    ScanConfig { verify_tls, timeout: Duration::from_secs(2), ..ScanConfig::default() }
}

#[tokio::test]
async fn invalid_certificates_are_accepted_by_default() {
    let addr = self_signed_server().await;
    let client = ScanConfig::default().http_client().unwrap();

    let observation = run_http_probe(&client, &addr.to_string(), Duration::from_secs(2)).await.unwrap();

    assert_eq!(observation.status, 404);
    assert_eq!(observation.body, BODY);
}

#[tokio::test]
async fn verify_tls_rejects_invalid_certificates() {
    let addr = self_signed_server().await;
    let client = config(true).http_client().unwrap();

    let err = run_http_probe(&client, &addr.to_string(), Duration::from_secs(2)).await.unwrap_err();

    assert!(err.starts_with("HTTP request failed"), "unexpected error: {err}");
}

#[tokio::test]
async fn dns_failures_leave_the_http_observation_intact() {
    let addr = self_signed_server().await;
    // Bound but never answering: both lookups run into the deadline.
    let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
    let nameserver = silent.local_addr().unwrap();
    let prober = NetworkProber::new(&config(false)).unwrap();

    let result = prober.probe(&addr.to_string(), nameserver, Duration::from_secs(1)).await;

    assert!(result.cname_error.is_some());
    assert!(result.address_error.is_some());
    assert!(result.cname.is_empty());
    assert!(result.addresses.is_empty());
    assert_eq!(result.response_status, Some(404));
    assert_eq!(result.response_body, BODY);
    assert!(result.http_error.is_none());
}
