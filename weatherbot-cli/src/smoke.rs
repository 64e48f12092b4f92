use anyhow::{Context, Result};
use reqwest::{Client, Response};
use weatherbot_core::{ChatRequest, ChatResponse};

pub const DEFAULT_MESSAGES: [&str; 2] = ["London", "ThisIsNotACityX123"];

/// Posts each message to a running server and prints what comes back.
///
/// A failed request is reported and the remaining messages are still sent.
pub async fn run(server: &str, messages: &[String]) -> Result<()> {
    let http = Client::new();

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("--- Requesting {message} ---");

        let res = match send(&http, server, message).await {
            Ok(res) => res,
            Err(err) => {
                println!("Request for '{message}' failed: {err:#}");
                continue;
            }
        };

        println!("Status: {}", res.status());
        match res.text().await {
            Ok(body) => println!("Response: {}", render_reply(&body)),
            Err(err) => println!("Failed to read response body: {err}"),
        }
    }

    Ok(())
}

async fn send(http: &Client, server: &str, message: &str) -> Result<Response> {
    let url = chat_url(server);

    http.post(&url)
        .json(&ChatRequest {
            message: message.to_string(),
        })
        .send()
        .await
        .with_context(|| format!("Failed to send request to {url}"))
}

/// The chat reply text, or the raw body when it isn't a chat response.
fn render_reply(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(reply) => reply.response,
        Err(_) => body.to_string(),
    }
}

fn chat_url(server: &str) -> String {
    format!("{}/chat", server.trim_end_matches('/'))
}
