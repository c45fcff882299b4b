//! End-to-end call classification against a real local HTTP listener.
//!
//! Each test serves exactly one canned response on a loopback socket and
//! asserts both the classification the client reports and the request
//! bytes it put on the wire.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::JoinHandle;

use kodictl_common::config::DeviceTarget;
use kodictl_rpc::{RemoteClient, RpcError};

fn target_for(addr: SocketAddr) -> DeviceTarget {
    DeviceTarget {
        host: addr.ip().to_string(),
        port: addr.port(),
        username: "kodi".into(),
        password: "secret".into(),
    }
}

fn find_blank_line(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Accepts one connection, reads one full HTTP request, answers with the
/// given status line and body, and returns the raw request text.
fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).expect("read failed");
            assert!(n > 0, "connection closed before headers arrived");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_blank_line(&buf) {
                break pos;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        while buf.len() < header_end + 4 + content_length {
            let n = stream.read(&mut chunk).expect("read failed");
            assert!(n > 0, "connection closed before body arrived");
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write failed");
        String::from_utf8_lossy(&buf).to_string()
    });
    (addr, handle)
}

#[test]
fn successful_call_posts_envelope_with_basic_auth() {
    let (addr, server) = serve_once("200 OK", r#"{"id":"1","jsonrpc":"2.0","result":"OK"}"#);
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let reply = client
        .try_call("Input.Up", None)
        .expect("call should succeed");
    assert_eq!(reply["result"], "OK");

    let request = server.join().expect("server thread panicked");
    assert!(request.starts_with("POST /jsonrpc HTTP/1.1\r\n"));
    // base64("kodi:secret")
    assert!(request.contains("authorization: Basic a29kaTpzZWNyZXQ=")
        || request.contains("Authorization: Basic a29kaTpzZWNyZXQ="));
    assert!(request.ends_with(r#"{"id":"1","jsonrpc":"2.0","method":"Input.Up"}"#));
}

#[test]
fn params_are_forwarded_when_supplied() {
    let (addr, server) = serve_once("200 OK", r#"{"id":"1","jsonrpc":"2.0","result":null}"#);
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let params = serde_json::json!({ "action": "osd" });
    let reply = client.try_call("Input.ExecuteAction", Some(params));
    assert!(reply.is_ok());

    let request = server.join().expect("server thread panicked");
    assert!(request.contains(r#""params":{"action":"osd"}"#));
}

#[test]
fn http_401_classifies_as_unauthorized() {
    let (addr, server) = serve_once("401 Unauthorized", "");
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let err = client
        .try_call("Input.Right", None)
        .expect_err("401 must fail");
    assert!(matches!(err, RpcError::Unauthorized));
    drop(server.join());
}

#[test]
fn http_401_call_returns_the_failure_sentinel() {
    let (addr, server) = serve_once("401 Unauthorized", "");
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    assert!(client.call("Input.Right", None).is_none());
    drop(server.join());
}

#[test]
fn refused_connection_classifies_as_transport() {
    // Bind then drop to get a loopback port nothing is listening on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        listener.local_addr().expect("no local addr")
    };
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let err = client
        .try_call("Input.Right", None)
        .expect_err("refused connection must fail");
    assert!(matches!(err, RpcError::Transport { .. }));
}

#[test]
fn refused_connection_call_returns_the_failure_sentinel() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        listener.local_addr().expect("no local addr")
    };
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    assert!(client.call("Input.Right", None).is_none());
}

#[test]
fn unexpected_status_classifies_with_its_code() {
    let (addr, server) = serve_once("503 Service Unavailable", "");
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let err = client
        .try_call("Input.Up", None)
        .expect_err("503 must fail");
    assert!(matches!(err, RpcError::Status { code: 503 }));
    drop(server.join());
}

#[test]
fn non_json_body_classifies_as_bad_reply() {
    let (addr, server) = serve_once("200 OK", "<html>not json</html>");
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let err = client
        .try_call("Input.Up", None)
        .expect_err("non-JSON body must fail");
    assert!(matches!(err, RpcError::BadReply { .. }));
    drop(server.join());
}

#[test]
fn dispatch_sends_the_command_method() {
    let (addr, server) = serve_once("200 OK", r#"{"id":"1","jsonrpc":"2.0","result":"OK"}"#);
    let client = RemoteClient::new(target_for(addr)).expect("client build failed");

    let reply = client.dispatch(kodictl_rpc::RemoteCommand::Menu);
    assert!(reply.is_some());

    let request = server.join().expect("server thread panicked");
    assert!(request.contains(r#""method":"Input.ContextMenu"#));
}
