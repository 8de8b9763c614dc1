//! One simulated load-test client: authenticate, then decode a text frame
//! that bundles several server replies.
//!
//! A real harness opens a WebSocket per virtual user, sends a connect command
//! carrying a signed token and counts the publications it receives. The
//! server may pack several JSON replies into one text frame with no
//! separator, so every frame goes through the splitter before the replies are
//! inspected.
//!
//! Run with
//!
//! ```bash
//! JWT_SECRET=secret WSPROBE_VU=3 cargo run -p wsprobe --example load_client
//! ```

use std::{env, process::ExitCode};

use wsprobe::{Claims, StreamSplitter, TokenSigner};

/// Far-future expiry so tokens never lapse during a run.
const TOKEN_EXPIRY: u64 = 9_590_186_316;

fn main() -> ExitCode {
    let Ok(secret) = env::var("JWT_SECRET") else {
        eprintln!("JWT_SECRET is not set");
        return ExitCode::FAILURE;
    };
    let vu: u32 = match env::var("WSPROBE_VU").map(|v| v.parse()) {
        Ok(Ok(vu)) => vu,
        Err(_) => 1,
        Ok(Err(err)) => {
            eprintln!("WSPROBE_VU is not a number: {err}");
            return ExitCode::FAILURE;
        }
    };

    let signer = match TokenSigner::new(secret) {
        Ok(signer) => signer,
        Err(err) => {
            eprintln!("cannot sign tokens: {err}");
            return ExitCode::FAILURE;
        }
    };
    let channel = format!("personal:#user{vu}");
    let token = match signer.sign(&Claims::new(format!("user{vu}"), TOKEN_EXPIRY)) {
        Ok(token) => token,
        Err(err) => {
            eprintln!("cannot sign tokens: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("VU {vu}: connect token {token}");

    // In real life this frame would come from the socket.
    let frame = format!(
        concat!(
            r#"{{"id":1,"connect":{{"client":"c-{vu}"}}}}"#,
            r#"{{"id":2,"subscribe":{{}}}}"#,
            r#"{{"push":{{"channel":"{channel}","pub":{{"data":{{"uuid":"0f6c","text":"hi {{there}}"}}}}}}}}"#,
            r#"{{"push":{{"channel":"extra1","pub":{{"data":{{"uuid":"9a41"}}}}}}}}"#,
            r#"{{"push":"#,
        ),
        vu = vu,
        channel = channel,
    );

    let mut splitter = StreamSplitter::default();
    let outcome = splitter.feed(&frame);
    for reply in &outcome.values {
        if let Some(client) = reply.pointer("/connect/client") {
            println!("VU {vu}: connected as {client}");
        } else if reply.get("subscribe").is_some() {
            println!("VU {vu}: subscribed to {channel}");
        } else if let (Some(channel), Some(uuid)) = (
            reply.pointer("/push/channel").and_then(|c| c.as_str()),
            reply.pointer("/push/pub/data/uuid").and_then(|u| u.as_str()),
        ) {
            let kind = if channel.contains("extra") { "extra" } else { "personal" };
            println!("VU {vu}: received {uuid} on {channel} ({kind})");
        }
    }
    for err in &outcome.errors {
        eprintln!("VU {vu}: {err}");
    }

    let stats = outcome.stats();
    println!(
        "VU {vu}: parsed={} dropped={} discarded_bytes={}",
        stats.parsed, stats.dropped, stats.discarded_bytes
    );
    ExitCode::SUCCESS
}
