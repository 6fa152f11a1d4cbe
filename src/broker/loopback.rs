//! Minimal in-process MQTT 3.1.1 broker for tests.
//!
//! Speaks just enough of the protocol to accept one CONNECT, answer with a
//! chosen CONNACK code and push QoS 0 PUBLISH packets.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::BrokerConfig;

/// Upper bound for any single wait on the client
pub(crate) const WAIT: Duration = Duration::from_secs(5);

/// CONNACK return code 0
pub(crate) const ACCEPTED: u8 = 0x00;

/// CONNACK return code 5
pub(crate) const NOT_AUTHORIZED: u8 = 0x05;

/// Bind on an ephemeral port and return a config pointing at it.
pub(crate) async fn bind() -> (TcpListener, BrokerConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = BrokerConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..BrokerConfig::default()
    };
    (listener, config)
}

/// Accept one client, consume its CONNECT and reply with `code`.
pub(crate) async fn accept(listener: &TcpListener, code: u8) -> TcpStream {
    let (mut stream, _) = tokio::time::timeout(WAIT, listener.accept())
        .await
        .expect("client never connected")
        .unwrap();

    let packet = read_packet(&mut stream).await;
    assert_eq!(packet[0] >> 4, 1, "first packet must be CONNECT");

    stream.write_all(&[0x20, 0x02, 0x00, code]).await.unwrap();
    stream
}

/// Read one whole packet (fixed header included).
async fn read_packet(stream: &mut TcpStream) -> Vec<u8> {
    let mut packet = vec![stream.read_u8().await.unwrap()];

    let mut remaining = 0usize;
    let mut shift = 0;
    loop {
        let byte = stream.read_u8().await.unwrap();
        packet.push(byte);
        remaining |= usize::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    let start = packet.len();
    packet.resize(start + remaining, 0);
    stream.read_exact(&mut packet[start..]).await.unwrap();
    packet
}

/// Collect everything the client sends until all `needles` have shown up.
pub(crate) async fn read_until(stream: &mut TcpStream, needles: &[&str]) -> String {
    let mut seen = Vec::new();
    let collect = async {
        let mut buf = [0u8; 512];
        loop {
            let text = String::from_utf8_lossy(&seen).into_owned();
            if needles.iter().all(|needle| text.contains(needle)) {
                return text;
            }
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed the connection; got {:?}", text);
            seen.extend_from_slice(&buf[..n]);
        }
    };

    tokio::time::timeout(WAIT, collect)
        .await
        .expect("client never sent the expected packets")
}

/// Push a QoS 0 PUBLISH to the client.
pub(crate) async fn publish(stream: &mut TcpStream, topic: &str, payload: &str) {
    let remaining = 2 + topic.len() + payload.len();
    assert!(remaining < 128);

    let mut packet = vec![0x30, remaining as u8];
    packet.extend_from_slice(&(topic.len() as u16).to_be_bytes());
    packet.extend_from_slice(topic.as_bytes());
    packet.extend_from_slice(payload.as_bytes());
    stream.write_all(&packet).await.unwrap();
}
