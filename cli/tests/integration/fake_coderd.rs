//! Minimal HTTP server standing in for coderd.

#![allow(clippy::expect_used)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

/// Serves canned `(path, status, body)` responses on a local port until the
/// test process exits. Unknown paths get a 404.
pub fn serve(routes: Vec<(String, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { return };
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            let path = request_line.split_whitespace().nth(1).unwrap_or("").to_string();
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if line == "\r\n" => break,
                    Ok(_) => {}
                }
            }
            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map_or((404, r#"{"message":"not found"}"#), |(_, s, b)| (*s, b.as_str()));
            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    url
}

/// Routes for one organization owning `workspaces`, each with a single
/// started resource holding one agent called `main`.
pub fn single_agent_workspaces(workspaces: &[&str]) -> Vec<(String, u16, String)> {
    let list: Vec<String> = workspaces
        .iter()
        .map(|name| {
            format!(
                r#"{{"id":"ws-{name}","name":"{name}","latest_build":{{"template_version_id":"tv-{name}","transition":"start"}}}}"#
            )
        })
        .collect();
    let mut routes = vec![
        (
            "/api/v2/users/me/organizations".to_string(),
            200,
            r#"[{"id":"org-1","name":"acme"}]"#.to_string(),
        ),
        (
            "/api/v2/organizations/org-1/workspaces/me".to_string(),
            200,
            format!("[{}]", list.join(",")),
        ),
    ];
    for name in workspaces {
        routes.push((
            format!("/api/v2/templateversions/tv-{name}/resources"),
            200,
            r#"[{"transition":"start","agents":[{"name":"main"}]}]"#.to_string(),
        ));
    }
    routes
}
