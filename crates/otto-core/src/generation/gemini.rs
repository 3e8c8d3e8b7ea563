//! Gemini `generateContent` client.

use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use super::service::{GenerationService, ServiceFailure};
use crate::storage::GenerationConfig;

pub struct GeminiClient {
    api_url: String,
    model_id: String,
    api_key: String,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
            http_client: Client::new(),
        }
    }

    /// `{api_url}/models/{model}:generateContent?key=...`
    pub fn endpoint(&self) -> Result<Url, ServiceFailure> {
        let raw = format!("{}/models/{}:generateContent", self.api_url, self.model_id);
        let mut url =
            Url::parse(&raw).map_err(|e| ServiceFailure::Transport(format!("bad endpoint: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn request_body(system_prompt: &str, user_payload: &str) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_payload }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        })
    }
}

/// Text of the first candidate part, or empty when the shape is off.
pub fn extract_text(body: &Value) -> String {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_payload: &str,
    ) -> Result<String, ServiceFailure> {
        let url = self.endpoint()?;
        log::debug!("POST {}/models/{}:generateContent", self.api_url, self.model_id);

        let resp = self
            .http_client
            .post(url)
            .json(&Self::request_body(system_prompt, user_payload))
            .send()
            .await
            .map_err(|e| ServiceFailure::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceFailure::Status(status.as_u16()));
        }

        // an undecodable body carries no text
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        Ok(extract_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> GeminiClient {
        GeminiClient::new(&GenerationConfig {
            api_url: server.url(),
            model_id: "gemini-test".into(),
            api_key: "k&ey".into(),
        })
    }

    #[test]
    fn endpoint_encodes_key() {
        let client = GeminiClient::new(&GenerationConfig {
            api_url: "https://example.test/v1beta/".into(),
            model_id: "gemini-x".into(),
            api_key: "a b".into(),
        });
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://example.test/v1beta/models/gemini-x:generateContent?key=a+b"
        );
    }

    #[test]
    fn extract_text_tolerates_missing_parts() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({"candidates": []})), "");
        assert_eq!(
            extract_text(&json!({"candidates": [{"content": {"parts": [{"text": "{}"}]}}]})),
            "{}"
        );
    }

    #[tokio::test]
    async fn posts_prompt_and_reads_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "k&ey".into()))
            .match_body(Matcher::PartialJson(json!({
                "systemInstruction": { "parts": [{ "text": "sys" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "{\"a\":1}" }] }],
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":" {\"title\":\"Go\"} "}]}}]}"#)
            .create_async()
            .await;

        let text = client_for(&server).generate("sys", "{\"a\":1}").await.unwrap();
        assert_eq!(text, r#" {"title":"Go"} "#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let err = client_for(&server).generate("s", "u").await.unwrap_err();
        assert_eq!(err, ServiceFailure::Status(403));
    }

    #[tokio::test]
    async fn non_json_body_yields_empty_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        assert_eq!(client_for(&server).generate("s", "u").await.unwrap(), "");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        let client = GeminiClient::new(&GenerationConfig {
            api_url: "http://127.0.0.1:9".into(),
            model_id: "m".into(),
            api_key: "k".into(),
        });
        assert!(matches!(
            client.generate("s", "u").await,
            Err(ServiceFailure::Transport(_))
        ));
    }
}
