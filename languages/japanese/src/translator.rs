use async_trait::async_trait;
use yomu_translate::{ProviderMetadata, TranslateError, Translator};

/// DeepL-backed translation provider.
///
/// All strings of one refresh go out in a single request; DeepL returns
/// `translations` in input order.
#[derive(Clone)]
pub struct JapaneseTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl JapaneseTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for JapaneseTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let from = from.to_uppercase();
        let to = to.to_uppercase();
        let mut params: Vec<(&str, &str)> =
            texts.iter().map(|t| ("text", t.as_str())).collect();
        params.push(("source_lang", &from));
        params.push(("target_lang", &to));

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))?;

        let translations = json["translations"]
            .as_array()
            .ok_or_else(|| TranslateError::ApiError("No translations in response".to_string()))?;

        translations
            .iter()
            .map(|t| {
                t["text"]
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| TranslateError::ApiError("Malformed translation".to_string()))
            })
            .collect()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}
