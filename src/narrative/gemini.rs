//! Gemini generative-language client and the narrator built on it

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::template::TemplateNarrator;
use super::{NarrativeSource, description_prompt, itinerary_prompt};
use crate::config::ModelConfig;
use crate::models::{PlaceOfInterest, WeatherReport};
use crate::{Result, TripPlannerError};

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// Single-prompt, single-response client for `models/{model}:generateContent`
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| TripPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the generated text
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TripPlannerError::model(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TripPlannerError::model(format!(
                "model returned {status}: {}",
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TripPlannerError::model(format!("invalid response: {}", e.without_url())))?;

        let text = parsed
            .into_text()
            .ok_or_else(|| TripPlannerError::model("response contained no text"))?;

        debug!(
            "Model answered {} chars in {:.3}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}

/// Narration through the model, falling back to templates on any error
pub struct GeminiNarrator {
    client: GeminiClient,
    fallback: TemplateNarrator,
}

impl GeminiNarrator {
    #[must_use]
    pub fn new(client: GeminiClient, fallback: TemplateNarrator) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl NarrativeSource for GeminiNarrator {
    fn kind(&self) -> &'static str {
        "gemini"
    }

    async fn describe_city(&self, city: &str, duration: u8) -> String {
        match self.client.generate(&description_prompt(city, duration)).await {
            Ok(text) => {
                info!("Generated description for {} with {}", city, self.client.model());
                text
            }
            Err(e) => {
                warn!("Description generation failed, using template: {}", e);
                self.fallback.describe_city(city, duration).await
            }
        }
    }

    async fn itinerary(
        &self,
        city: &str,
        duration: u8,
        weather: &WeatherReport,
        places: &[PlaceOfInterest],
    ) -> String {
        let prompt = itinerary_prompt(city, duration, weather, places);
        match self.client.generate(&prompt).await {
            Ok(text) => {
                info!("Generated {}-day itinerary for {}", duration, city);
                text
            }
            Err(e) => {
                warn!("Itinerary generation failed, using template: {}", e);
                self.fallback
                    .itinerary(city, duration, weather, places)
                    .await
            }
        }
    }
}
