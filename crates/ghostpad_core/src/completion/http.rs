//! OpenAI-compatible chat-completions transport.

use super::{looks_rate_limited, CompletionClient, CompletionError, CompletionPrompt};
use crate::config::Config;
use crate::constants::COMPLETION_MAX_TOKENS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const COMPLETION_TEMPERATURE: f32 = 0.2;
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Where and how to reach the completion provider.
#[derive(Debug, Clone)]
pub struct CompletionEndpoint {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CompletionEndpoint {
    /// Build an endpoint from runtime config and a resolved credential.
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            base_url: config.api_base.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking HTTP client for the chat-completions endpoint.
pub struct HttpCompletionClient {
    http: reqwest::blocking::Client,
    endpoint: CompletionEndpoint,
}

impl HttpCompletionClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    /// Returns [`CompletionError::MissingCredential`] when the key is blank, or
    /// [`CompletionError::Request`] when the HTTP client cannot be built.
    pub fn new(endpoint: CompletionEndpoint) -> Result<Self, CompletionError> {
        if endpoint.api_key.trim().is_empty() {
            return Err(CompletionError::MissingCredential);
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|err| CompletionError::Request(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self { http, endpoint })
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.endpoint.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: COMPLETION_MAX_TOKENS,
            temperature: COMPLETION_TEMPERATURE,
        };

        let response = self
            .http
            .post(self.endpoint.chat_url())
            .bearer_auth(self.endpoint.api_key.trim())
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "completion request failed");
            return Err(classify_failure(status.as_u16(), &body));
        }

        let body = response.text()?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!(chars = content.chars().count(), "completion received");
        Ok(content)
    }
}

/// Map a non-success provider response onto the error taxonomy.
pub(crate) fn classify_failure(status: u16, body: &str) -> CompletionError {
    match status {
        401 | 403 => CompletionError::Unauthorized,
        429 => CompletionError::RateLimited,
        _ if looks_rate_limited(body) => CompletionError::RateLimited,
        _ => {
            let snippet: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            CompletionError::Request(format!("provider returned HTTP {}: {}", status, snippet))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    fn endpoint(base_url: String) -> CompletionEndpoint {
        CompletionEndpoint {
            base_url,
            model: "test-model".to_string(),
            api_key: "sk-test".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn prompt() -> CompletionPrompt {
        CompletionPrompt {
            system: "system text".to_string(),
            user: "user text".to_string(),
        }
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve exactly one canned HTTP response and hand back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
            request
        });
        (format!("http://{}/v1/", addr), handle)
    }

    #[test]
    fn blank_key_is_a_missing_credential() {
        let mut endpoint = endpoint("http://127.0.0.1:9/v1".to_string());
        endpoint.api_key = "   ".to_string();
        assert!(matches!(
            HttpCompletionClient::new(endpoint),
            Err(CompletionError::MissingCredential)
        ));
    }

    #[test]
    fn success_returns_first_choice_and_sends_chat_request() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"[SPACE] world"}}]}"#,
        );
        let client = HttpCompletionClient::new(endpoint(base)).expect("client");
        let content = client.complete(&prompt()).expect("completion");
        assert_eq!(content, "[SPACE] world");

        let request = server.join().expect("stub thread").to_ascii_lowercase();
        assert!(request.starts_with("post /v1/chat/completions "));
        assert!(request.contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""model":"test-model""#));
        assert!(request.contains(r#""role":"system""#));
        assert!(request.contains(r#""content":"user text""#));
        assert!(request.contains(r#""max_tokens":48"#));
    }

    #[test]
    fn empty_choices_yield_empty_text() {
        let (base, server) = serve_once("200 OK", r#"{"choices":[]}"#);
        let client = HttpCompletionClient::new(endpoint(base)).expect("client");
        assert_eq!(client.complete(&prompt()).expect("completion"), "");
        server.join().expect("stub thread");
    }

    #[test]
    fn throttling_status_maps_to_rate_limited() {
        let (base, server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"slow down"}}"#,
        );
        let client = HttpCompletionClient::new(endpoint(base)).expect("client");
        assert_eq!(
            client.complete(&prompt()),
            Err(CompletionError::RateLimited)
        );
        server.join().expect("stub thread");
    }

    #[test]
    fn rejected_key_maps_to_unauthorized() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#);
        let client = HttpCompletionClient::new(endpoint(base)).expect("client");
        assert_eq!(
            client.complete(&prompt()),
            Err(CompletionError::Unauthorized)
        );
        server.join().expect("stub thread");
    }

    #[test]
    fn unreachable_provider_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let client =
            HttpCompletionClient::new(endpoint(format!("http://{}/v1", addr))).expect("client");
        assert!(matches!(
            client.complete(&prompt()),
            Err(CompletionError::Network(_))
        ));
    }

    #[test]
    fn classify_failure_reads_quota_messages_from_the_body() {
        assert_eq!(
            classify_failure(403, "forbidden"),
            CompletionError::Unauthorized
        );
        assert_eq!(
            classify_failure(400, "You exceeded your current quota"),
            CompletionError::RateLimited
        );
        assert_eq!(
            classify_failure(500, "  upstream exploded  "),
            CompletionError::Request("provider returned HTTP 500: upstream exploded".to_string())
        );
    }
}
