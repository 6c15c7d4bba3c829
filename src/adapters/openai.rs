use crate::config::{ApiCredential, RunSettings};
use crate::core::{ColorClassifier, ColorResult};
use crate::utils::error::{AnnotateError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COLOR_PROMPT: &str = concat!(
    "You are a vision model assistant. The image shows a product on a white background. ",
    "Identify up to 2 dominant colors of the product. The primary color must cover most of the product. ",
    "Only include a secondary color if it clearly covers at least 15% of the product. ",
    "Return only common color names like 'red', 'blue', 'green', 'black', 'white', etc. ",
    "Avoid branding or specific tones (e.g. use 'green' instead of 'paramedic green'). ",
    "Respond in this exact JSON format: {\"primary\": \"<color>\", \"secondary\": \"<color>\"} ",
    "or {\"primary\": \"<color>\"}"
);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Chat-completions client asking a vision model for a product's colors.
pub struct OpenAiClassifier {
    client: Client,
    endpoint: String,
    model: String,
    credential: ApiCredential,
}

impl OpenAiClassifier {
    pub fn new(settings: &RunSettings, credential: ApiCredential) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            model: settings.model.clone(),
            credential,
        })
    }

    fn build_request<'a>(&'a self, image_url: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    }]),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(COLOR_PROMPT),
                },
            ],
            temperature: 0.0,
        }
    }

    async fn request_colors(&self, image_url: &str) -> Result<ColorResult> {
        tracing::debug!("Requesting colors from {} for {}", self.endpoint, image_url);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&self.build_request(image_url))
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AnnotateError::ClassificationError {
                message: "response contained no choices".to_string(),
            })?;

        match message.content {
            Some(content) => parse_color_response(&content),
            None => Err(AnnotateError::ClassificationError {
                message: format!(
                    "model returned no content{}",
                    message
                        .refusal
                        .map(|r| format!(" (refusal: {})", r))
                        .unwrap_or_default()
                ),
            }),
        }
    }
}

#[async_trait]
impl ColorClassifier for OpenAiClassifier {
    async fn classify(&self, image_url: &str) -> ColorResult {
        match self.request_colors(image_url).await {
            Ok(colors) => colors,
            Err(e) => {
                tracing::error!("Color detection failed for {}: {}", image_url, e);
                ColorResult::default()
            }
        }
    }
}

/// Reads `{"primary": ..., "secondary": ...}` from the model's text.
///
/// Missing or non-string keys become empty strings; anything other than a
/// JSON object is an error.
pub fn parse_color_response(content: &str) -> Result<ColorResult> {
    let value: Value = serde_json::from_str(content.trim())?;
    let Value::Object(map) = value else {
        return Err(AnnotateError::ClassificationError {
            message: format!("expected a JSON object, got: {}", content.trim()),
        });
    };

    let field = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(ColorResult {
        primary: field("primary"),
        secondary: field("secondary"),
    })
}
