use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{pin_headword, ContentProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::flashcards::LexicalRecord;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Fields the provider must always fill
const REQUIRED_FIELDS: [&str; 11] = [
    "word",
    "ipa",
    "englishDefinition",
    "englishSynonyms",
    "englishAntonyms",
    "englishExamples",
    "persianTranslation",
    "persianPhonetic",
    "persianSynonyms",
    "persianAntonyms",
    "persianExamples",
];

/// Gemini `generateContent` client with a JSON response schema
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client. A missing API key is only reported when a card is
    /// actually requested, so cache-only use keeps working without one.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, word: &str) -> Result<LexicalRecord, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(word))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        parse_response(body, word)
    }
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn fetch(&self, word: &str) -> Result<LexicalRecord, ProviderError> {
        let result = self.generate(word).await;
        if let Err(ref e) = result {
            log::error!("Error generating content for '{}': {}", word, e);
        }
        result
    }
}

fn build_prompt(word: &str) -> String {
    format!(
        "Generate a detailed vocabulary flashcard for a native Persian speaker learning English. \
         The word is \"{}\". Provide natural, culturally relevant Persian translations and examples. \
         Ensure all fields in the JSON schema are filled accurately.",
        word
    )
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "word": { "type": "STRING", "description": "The English word." },
            "ipa": { "type": "STRING", "description": "International Phonetic Alphabet (IPA) transcription." },
            "englishDefinition": { "type": "STRING", "description": "A concise definition in English." },
            "englishSynonyms": string_list("2-3 English synonyms."),
            "englishAntonyms": string_list("2-3 English antonyms."),
            "englishExamples": string_list("Two example sentences in English."),
            "persianTranslation": { "type": "STRING", "description": "The most accurate Persian translation." },
            "persianPhonetic": { "type": "STRING", "description": "A simplified Persian phonetic spelling." },
            "persianSynonyms": string_list("2-3 Persian synonyms."),
            "persianAntonyms": string_list("2-3 Persian antonyms."),
            "persianExamples": string_list("Two example sentences in Persian."),
            "extraNote": {
                "type": "STRING",
                "nullable": true,
                "description": "Optional grammar or usage note, in Persian.",
            },
        },
        "required": REQUIRED_FIELDS,
    })
}

fn request_body(word: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_prompt(word) }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Strip a Markdown code fence some models wrap JSON output in
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_response(
    response: GenerateContentResponse,
    word: &str,
) -> Result<LexicalRecord, ProviderError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.finish_reason {
            log::warn!("Empty candidate for '{}' (finish reason {})", word, reason);
        }
        return Err(ProviderError::EmptyResponse);
    }

    let record: LexicalRecord = serde_json::from_str(strip_code_fence(&text))?;
    Ok(pin_headword(record, word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn card_json(word: &str) -> Value {
        json!({
            "word": word,
            "ipa": "/dʒʌmp/",
            "englishDefinition": "To push oneself off the ground.",
            "englishSynonyms": ["leap", "hop"],
            "englishAntonyms": ["fall"],
            "englishExamples": ["The cat jumped.", "Jump higher!"],
            "persianTranslation": "پریدن",
            "persianPhonetic": "جامپ",
            "persianSynonyms": ["جهیدن"],
            "persianAntonyms": ["افتادن"],
            "persianExamples": ["گربه پرید.", "بالاتر بپر!"]
        })
    }

    fn response_with_text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let body = request_body("jump");

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"jump\""));
        assert!(prompt.contains("native Persian speaker"));

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        let required = config["responseSchema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 11);
        assert!(!required.contains(&json!("extraNote")));
        assert_eq!(config["responseSchema"]["properties"]["extraNote"]["nullable"], true);
        assert_eq!(
            config["responseSchema"]["properties"]["persianExamples"]["items"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_parse_valid_response() {
        let response = response_with_text(&format!("  {}\n", card_json("jump")));
        let record = parse_response(response, "jump").unwrap();
        assert_eq!(record.word, "jump");
        assert_eq!(record.english_synonyms, vec!["leap", "hop"]);
        assert_eq!(record.extra_note, None);
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = response_with_text(&format!("```json\n{}\n```", card_json("jump")));
        let record = parse_response(response, "jump").unwrap();
        assert_eq!(record.persian_translation, "پریدن");
    }

    #[test]
    fn test_parse_defaults_omitted_lists() {
        let mut card = card_json("jump");
        let obj = card.as_object_mut().unwrap();
        obj.remove("englishAntonyms");
        obj.insert("persianSynonyms".to_string(), Value::Null);

        let record = parse_response(response_with_text(&card.to_string()), "jump").unwrap();
        assert!(record.english_antonyms.is_empty());
        assert!(record.persian_synonyms.is_empty());
    }

    #[test]
    fn test_parse_pins_requested_headword() {
        let response = response_with_text(&card_json("Jump").to_string());
        let record = parse_response(response, "jump").unwrap();
        assert_eq!(record.word, "jump");
    }

    #[test]
    fn test_parse_rejects_incomplete_record() {
        let mut card = card_json("jump");
        card.as_object_mut().unwrap().remove("ipa");

        let result = parse_response(response_with_text(&card.to_string()), "jump");
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_non_json_text() {
        let result = parse_response(response_with_text("Sorry, I can't help with that."), "jump");
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(parse_response(response, "jump"), Err(ProviderError::EmptyResponse)));

        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert!(matches!(parse_response(response, "jump"), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid.");
        assert_eq!(api_error_message(" upstream timeout "), "upstream timeout");
    }

    #[test]
    fn test_endpoint_uses_model_and_trims_base() {
        let config = ProviderConfig {
            base_url: "https://example.test/v1beta/".to_string(),
            ..ProviderConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            format!("https://example.test/v1beta/models/{}:generateContent", DEFAULT_MODEL)
        );
    }

    #[tokio::test]
    async fn test_fetch_without_key_fails_before_network() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..ProviderConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();

        let result = client.fetch("jump").await;
        assert!(matches!(result, Err(ProviderError::MissingApiKey)));
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve one HTTP response on a local port; the handle yields the raw request
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (base_url, handle)
    }

    fn client_for(base_url: String) -> GeminiClient {
        // Talk to the local server directly even when a proxy is configured
        GeminiClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url,
            model: DEFAULT_MODEL.to_string(),
            api_key: Some("test-key".to_string()),
        }
    }

    #[tokio::test]
    async fn test_fetch_over_http_normalizes_record() {
        let mut card = card_json("Jump");
        let obj = card.as_object_mut().unwrap();
        obj.remove("englishAntonyms");
        obj.remove("persianSynonyms");

        let envelope = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": card.to_string() }] },
                "finishReason": "STOP"
            }]
        });
        let (base_url, server) = serve_once("200 OK", envelope.to_string()).await;

        let record = client_for(base_url).fetch("jump").await.unwrap();
        assert_eq!(record.word, "jump");
        assert!(record.english_antonyms.is_empty());
        assert!(record.persian_synonyms.is_empty());
        assert_eq!(record.persian_translation, "پریدن");

        let request = server.await.unwrap();
        let head = request.to_lowercase();
        assert!(request.starts_with(&format!(
            "POST /v1beta/models/{}:generateContent ",
            DEFAULT_MODEL
        )));
        assert!(head.contains("x-goog-api-key: test-key"));
        assert!(request.contains("\"responseMimeType\":\"application/json\""));
    }

    #[tokio::test]
    async fn test_fetch_over_http_reports_api_error() {
        let body = json!({ "error": { "code": 400, "message": "bad key" } }).to_string();
        let (base_url, server) = serve_once("400 Bad Request", body).await;

        let result = client_for(base_url).fetch("jump").await;
        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad key");
            }
            other => panic!("expected Api error, got {:?}", other),
        }

        server.await.unwrap();
    }
}
