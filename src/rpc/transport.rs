//! HTTP transport for JSON-RPC bodies

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Web3Error, Web3Result};

/// Sends one JSON-RPC body (a single envelope or a batch array) and returns
/// the parsed JSON reply.
pub trait Transport: Send + Sync {
    fn send(&self, body: &Value) -> Web3Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, body: &Value) -> Web3Result<Value> {
        (**self).send(body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, body: &Value) -> Web3Result<Value> {
        (**self).send(body)
    }
}

/// Blocking HTTP(S) POST transport
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    pub fn new(config: &ClientConfig) -> Web3Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .tcp_nodelay(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Web3Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.rpc_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn send(&self, body: &Value) -> Web3Result<Value> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            crate::log_warn!("rpc", "Node returned an HTTP error", status = status, endpoint = self.url);
            return Err(Web3Error::network(format!("HTTP status {}", status)));
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Err(Web3Error::network("Empty response body"));
        }

        serde_json::from_str(&text)
            .map_err(|e| Web3Error::parse(format!("Malformed JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport_for(server: &mockito::Server) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new(server.url())).unwrap()
    }

    #[test]
    fn test_posts_json_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({"jsonrpc": "2.0", "method": "eth_blockNumber", "params": [], "id": 1})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x10"}"#)
            .create();

        let transport = transport_for(&server);
        let reply = transport
            .send(&json!({"jsonrpc": "2.0", "method": "eth_blockNumber", "params": [], "id": 1}))
            .unwrap();

        assert_eq!(reply["result"], json!("0x10"));
        mock.assert();
    }

    #[test]
    fn test_http_error_status() {
        let mut server = mockito::Server::new();
        server.mock("POST", "/").with_status(503).create();

        let err = transport_for(&server).send(&json!({})).unwrap_err();
        assert!(matches!(err, Web3Error::Network(ref msg) if msg.contains("503")));
    }

    #[test]
    fn test_empty_body() {
        let mut server = mockito::Server::new();
        server.mock("POST", "/").with_status(200).with_body("").create();

        let err = transport_for(&server).send(&json!({})).unwrap_err();
        assert!(matches!(err, Web3Error::Network(_)));
    }

    #[test]
    fn test_malformed_json() {
        let mut server = mockito::Server::new();
        server.mock("POST", "/").with_status(200).with_body("{not json").create();

        let err = transport_for(&server).send(&json!({})).unwrap_err();
        assert!(matches!(err, Web3Error::Parse(_)));
    }

    #[test]
    fn test_connection_refused() {
        // Nothing listens on port 9 locally
        let transport = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = transport.send(&json!({})).unwrap_err();
        assert!(matches!(err, Web3Error::Network(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            HttpTransport::new(&ClientConfig::new("ftp://example.org")),
            Err(Web3Error::Config(_))
        ));
    }
}
