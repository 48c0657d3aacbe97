//! External vision classifier call.
//!
//! The contract is deliberately thin: 1..15 images plus a fixed instruction
//! prompt go out, one free-form text blob comes back. Any transport or parse
//! failure is a `ClassifierFailure` for the current action only — the caller
//! inserts no record when this fails.

use crate::error::{ArborError, Result};
use base64::Engine;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Fixed instruction sent with every request. The reply's "High"/"Medium"
/// wording is what risk derivation keys on.
const PROMPT: &str = "Act as an expert consulting arborist. Analyze the image(s) for: \
1. Biomechanics and failure risk. 2. Foliar health and pests. \
3. CODIT compartmentalization. Define the overall risk as 'Low', 'Medium' or 'High'.";

pub struct Classifier {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().map(|e| e.to_string_lossy().to_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        _ => "image/jpeg",
    }
}

fn build_content(prompt: &str, images: &[(String, Vec<u8>)]) -> serde_json::Value {
    let mut content = vec![serde_json::json!({"type": "text", "text": prompt})];
    for (mime, bytes) in images {
        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        content.push(serde_json::json!({
            "type": "image_url",
            "image_url": {"url": format!("data:{};base64,{}", mime, b64)}
        }));
    }
    serde_json::Value::Array(content)
}

fn parse_response(body: &str) -> Result<String> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ArborError::ClassifierFailure(format!("unusable response: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ArborError::ClassifierFailure("response contained no choices".into()))
}

impl Classifier {
    pub fn new(api_key: String, model: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ArborError::ClassifierFailure(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Send the staged images for assessment and return the reply text.
    pub async fn analyze(&self, image_paths: &[String]) -> Result<String> {
        let mut images = Vec::new();
        for path_text in image_paths {
            let path = Path::new(path_text);
            let bytes = std::fs::read(path)
                .map_err(|e| ArborError::ClassifierFailure(format!("{}: {}", path_text, e)))?;
            images.push((mime_for(path).to_string(), bytes));
        }

        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{
                "role": "user",
                "content": build_content(PROMPT, &images),
            }]
        });

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ArborError::ClassifierFailure(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ArborError::ClassifierFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(ArborError::ClassifierFailure(format!(
                "service returned {}: {}",
                status, text
            )));
        }

        parse_response(&text)
    }
}
