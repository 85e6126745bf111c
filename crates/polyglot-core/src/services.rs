use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, SummarizationConfig, TranslationConfig};
use crate::model::ModelProvider;
use crate::summarizer::Summarizer;
use crate::translator::Translator;
use crate::Result;

/// Wires the shared model provider into translators and summarizers.
///
/// Built once at start-up and shared by every request. Models are loaded on
/// the first `translator()` / `summarizer()` call and reused afterwards.
pub struct Services {
    provider: Arc<ModelProvider>,
    translation: TranslationConfig,
    summarization: SummarizationConfig,
}

impl Services {
    pub fn new(provider: Arc<ModelProvider>, config: &AppConfig) -> Self {
        Self {
            provider,
            translation: config.translation.clone(),
            summarization: config.summarization.clone(),
        }
    }

    /// Services backed by the configured inference service
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = Arc::new(ModelProvider::from_config(&config.models)?);
        Ok(Self::new(provider, config))
    }

    /// Load both models now instead of on the first request.
    pub async fn warm_up(&self) -> Result<()> {
        self.provider.get_translation_model().await?;
        self.provider.get_summarization_model().await?;
        info!("Translation and summarization models ready");
        Ok(())
    }

    pub fn provider(&self) -> &Arc<ModelProvider> {
        &self.provider
    }

    pub async fn translator(&self) -> Result<Translator> {
        let model = self.provider.get_translation_model().await?;
        Ok(Translator::new(model, &self.translation))
    }

    pub async fn summarizer(&self) -> Result<Summarizer> {
        let model = self.provider.get_summarization_model().await?;
        Ok(Summarizer::new(model, &self.summarization))
    }

    pub fn translation_config(&self) -> &TranslationConfig {
        &self.translation
    }

    pub fn summarization_config(&self) -> &SummarizationConfig {
        &self.summarization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingModel, StaticLoader};

    #[tokio::test]
    async fn test_models_loaded_once_across_components() {
        let translation = RecordingModel::replying("Hallo");
        let summarization = RecordingModel::replying("Kurz");
        let loader = StaticLoader::new(translation.handle(), summarization.handle());
        let provider = Arc::new(ModelProvider::new(loader.clone(), "m2m", "bart"));
        let services = Services::new(provider, &AppConfig::default());

        for _ in 0..3 {
            let translator = services.translator().await.unwrap();
            assert_eq!(translator.translate("Hello", "en", "de").await.unwrap(), "Hallo");
        }
        let summarizer = services.summarizer().await.unwrap();
        assert_eq!(summarizer.summarize("Long text").await.unwrap(), "Kurz");

        assert_eq!(loader.loads(), 2);
        assert_eq!(translation.requests().len(), 3);
        assert_eq!(summarization.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_warm_up_loads_both_models_once() {
        let loader = StaticLoader::new(
            RecordingModel::replying("a").handle(),
            RecordingModel::replying("b").handle(),
        );
        let provider = Arc::new(ModelProvider::new(loader.clone(), "m2m", "bart"));
        let services = Services::new(provider, &AppConfig::default());

        services.warm_up().await.unwrap();
        services.translator().await.unwrap();
        services.summarizer().await.unwrap();
        assert_eq!(loader.loads(), 2);
    }
}
