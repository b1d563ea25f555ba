use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, LlmConfig};

/// Invoke the external generation capability with the service's fixed,
/// task-tuned sampling parameters. Returns the whitespace-trimmed answer;
/// an empty answer is an error, never silently substituted.
pub async fn generate(
    client: &reqwest::Client,
    config: &LlmConfig,
    gen: &GenerationConfig,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let raw = match config.provider.as_str() {
        "ollama" => generate_ollama(client, config, gen, model, prompt).await?,
        "openai" => generate_openai(client, config, gen, model, prompt).await?,
        other => anyhow::bail!("Unknown LLM provider: {other}"),
    };

    let answer = raw.trim();
    if answer.is_empty() {
        anyhow::bail!("Generation returned no usable text");
    }
    Ok(answer.to_string())
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    num_predict: u32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

async fn generate_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    gen: &GenerationConfig,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/api/generate", config.base_url);

    let req = OllamaGenerateRequest {
        model: model.to_string(),
        prompt: prompt.to_string(),
        stream: false,
        options: OllamaOptions {
            temperature: gen.temperature,
            top_k: gen.top_k,
            top_p: gen.top_p,
            num_predict: gen.max_tokens,
            stop: gen.stop.clone(),
        },
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama generate API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama generate API returned {status}: {body}");
    }

    let body: OllamaGenerateResponse = resp
        .json()
        .await
        .context("Failed to parse Ollama generate response")?;

    Ok(body.response)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stop: Vec<String>,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

async fn generate_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    gen: &GenerationConfig,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: model.to_string(),
        messages: vec![OpenAiMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        temperature: gen.temperature,
        top_p: gen.top_p,
        max_tokens: gen.max_tokens,
        stop: gen.stop.clone(),
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body: OpenAiChatResponse = resp
        .json()
        .await
        .context("Failed to parse OpenAI chat response")?;

    Ok(body
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_request_serializes_options() {
        let req = OllamaGenerateRequest {
            model: "phi3:3.8b".into(),
            prompt: "p".into(),
            stream: false,
            options: OllamaOptions {
                temperature: 0.1,
                top_k: 20,
                top_p: 0.85,
                num_predict: 512,
                stop: vec!["\n\nUSER:".into()],
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.1f32 as f64);
        assert_eq!(json["options"]["top_k"], 20);
        assert_eq!(json["options"]["num_predict"], 512);
    }

    #[test]
    fn test_ollama_response_parses() {
        let body: OllamaGenerateResponse =
            serde_json::from_str(r#"{"response": "  Dr. Rao teaches ML.  ", "done": true}"#)
                .unwrap();
        assert_eq!(body.response.trim(), "Dr. Rao teaches ML.");
    }

    #[test]
    fn test_openai_response_parses() {
        let body: OpenAiChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"An answer"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.choices[0].message.content, "An answer");
    }
}
