use crate::Translator;

/// Sentinel shown in place of a translation when the provider is down.
///
/// A transient translation outage degrades to boxes with this tooltip text
/// instead of aborting the whole refresh.
pub const TRANSLATION_UNAVAILABLE: &str = "[translation unavailable]";

/// Batch adapter over a [`Translator`]: always returns exactly one output per
/// input. Provider failures and malformed (wrong-length) responses are
/// absorbed here and replaced with [`TRANSLATION_UNAVAILABLE`].
pub async fn translate_all(
    translator: &dyn Translator,
    texts: &[String],
    from: &str,
    to: &str,
) -> Vec<String> {
    if texts.is_empty() {
        return Vec::new();
    }

    match translator.translate_batch(texts, from, to).await {
        Ok(translations) if translations.len() == texts.len() => translations,
        Ok(translations) => {
            tracing::warn!(
                expected = texts.len(),
                got = translations.len(),
                "translator returned wrong batch length, substituting sentinel"
            );
            vec![TRANSLATION_UNAVAILABLE.to_string(); texts.len()]
        }
        Err(e) => {
            tracing::warn!("translation failed: {e}");
            vec![TRANSLATION_UNAVAILABLE.to_string(); texts.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProviderMetadata, TranslateError};

    struct Uppercaser;

    #[async_trait::async_trait]
    impl Translator for Uppercaser {
        async fn translate_batch(
            &self,
            texts: &[String],
            _from: &str,
            _to: &str,
        ) -> Result<Vec<String>, TranslateError> {
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "uppercaser".to_string(),
                requires_api_key: false,
            }
        }
    }

    struct AlwaysFails;

    #[async_trait::async_trait]
    impl Translator for AlwaysFails {
        async fn translate_batch(
            &self,
            _texts: &[String],
            _from: &str,
            _to: &str,
        ) -> Result<Vec<String>, TranslateError> {
            Err(TranslateError::ApiError("boom".to_string()))
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "always-fails".to_string(),
                requires_api_key: false,
            }
        }
    }

    struct WrongLength;

    #[async_trait::async_trait]
    impl Translator for WrongLength {
        async fn translate_batch(
            &self,
            _texts: &[String],
            _from: &str,
            _to: &str,
        ) -> Result<Vec<String>, TranslateError> {
            Ok(vec!["only one".to_string()])
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "wrong-length".to_string(),
                requires_api_key: false,
            }
        }
    }

    #[tokio::test]
    async fn output_length_matches_input() {
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let out = translate_all(&Uppercaser, &texts, "ja", "en").await;
        assert_eq!(out, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn empty_input_returns_empty_without_calling_provider() {
        // AlwaysFails would yield sentinels if invoked
        let out = translate_all(&AlwaysFails, &[], "ja", "en").await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_yields_sentinel_per_input() {
        let texts = vec!["x".to_string(), "y".to_string()];
        let out = translate_all(&AlwaysFails, &texts, "ja", "en").await;
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|t| t == TRANSLATION_UNAVAILABLE));
    }

    #[tokio::test]
    async fn wrong_length_response_yields_sentinel_per_input() {
        let texts = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let out = translate_all(&WrongLength, &texts, "ja", "en").await;
        assert_eq!(out, vec![TRANSLATION_UNAVAILABLE; 3]);
    }
}
