#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;
use tiny_http::{Response, Server, StatusCode};

use rusty_calldata_adapters::{HttpSignatureRegistry, RegistryKind, ResolverConfig};

/// Local stand-in for both registries; records every request URL
pub fn spawn_mock_server(calls: Arc<Mutex<Vec<String>>>) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..32 {
            let req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let url = req.url().to_owned();
            if let Ok(mut g) = calls.lock() {
                g.push(url.clone());
            }

            let (code, payload) = route(&url);
            let response = Response::from_string(payload).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}

fn route(url: &str) -> (u16, String) {
    let four_byte = |sigs: &[&str]| {
        let results: Vec<_> = sigs
            .iter()
            .enumerate()
            .map(|(id, s)| json!({ "id": id, "text_signature": s, "hex_signature": "" }))
            .collect();
        json!({ "count": sigs.len(), "next": null, "previous": null, "results": results })
            .to_string()
    };

    match url {
        u if u.starts_with("/api/v1/signatures/") && u.contains("hex_signature=0xa9059cbb") => (
            200,
            four_byte(&["transfer(address,uint256)", "many_msg_babbage(bytes1)"]),
        ),
        u if u.starts_with("/api/v1/signatures/") && u.contains("hex_signature=0x8456cb59") => {
            (200, four_byte(&["pause()"]))
        }
        u if u.starts_with("/api/v1/signatures/") && u.contains("hex_signature=0xdeadbeef") => {
            (500, "internal error".to_owned())
        }
        u if u.starts_with("/api/v1/signatures/") && u.contains("hex_signature=0x0badf00d") => {
            (200, "not json".to_owned())
        }
        u if u.starts_with("/api/v1/signatures/") => (200, four_byte(&[])),
        u if u.starts_with("/lookup") && u.contains("function=0xa9059cbb") => (
            200,
            json!({
                "ok": true,
                "result": {
                    "event": {},
                    "function": {
                        "0xa9059cbb": [
                            { "name": "transfer(address,uint256)", "filtered": false, "hasVerifiedContract": false },
                            { "name": "many_msg_babbage(bytes1)", "filtered": false, "hasVerifiedContract": true }
                        ]
                    }
                }
            })
            .to_string(),
        ),
        u if u.starts_with("/lookup") && u.contains("function=0x12345678") => (
            200,
            json!({ "ok": true, "result": { "event": {}, "function": { "0x12345678": null } } })
                .to_string(),
        ),
        u if u.starts_with("/lookup") => (
            200,
            json!({ "ok": false, "result": { "event": {}, "function": {} } }).to_string(),
        ),
        _ => (404, json!({ "error": "not found" }).to_string()),
    }
}

pub fn four_byte_registry(base_url: &str) -> HttpSignatureRegistry {
    HttpSignatureRegistry::with_config(ResolverConfig {
        registry: RegistryKind::FourByteDirectory,
        base_url: Some(base_url.to_owned()),
        timeout_ms: 5_000,
        ..ResolverConfig::default()
    })
    .expect("http client")
}

pub fn sourcify_registry(base_url: &str) -> HttpSignatureRegistry {
    HttpSignatureRegistry::with_config(ResolverConfig {
        registry: RegistryKind::Sourcify,
        base_url: Some(format!("{base_url}/lookup")),
        timeout_ms: 5_000,
        ..ResolverConfig::default()
    })
    .expect("http client")
}
