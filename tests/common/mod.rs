#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::thread;

/// Minimal TCP echo responder: for each client it sends a prompt, reads one
/// line, sends it back and closes. Serves until the test process exits.
pub fn spawn_echo_responder() -> SocketAddr {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind echo responder");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for conn in listener.incoming() {
            let Ok(mut stream) = conn else { continue };
            if stream.write_all(b"Say something:\n> ").is_err() {
                continue;
            }
            let mut line = String::new();
            let mut reader = BufReader::new(&stream);
            if reader.read_line(&mut line).is_err() {
                continue;
            }
            let reply = format!("You said: {}\n", line.trim_end());
            let _ = stream.write_all(reply.as_bytes());
        }
    });
    addr
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind probe port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}
