use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{ModelHandle, ModelKind, ModelSpec};
use crate::config::ModelsConfig;
use crate::Result;

/// Loads model weights and tokenizer configuration for a spec.
#[async_trait::async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, spec: &ModelSpec) -> Result<ModelHandle>;

    /// Whether the backing service is reachable
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Lazily loads one model per kind and hands out the same instance forever.
///
/// Concurrent first callers wait on a single load. A failed load leaves the
/// slot empty so the next caller tries again.
pub struct ModelProvider {
    loader: Arc<dyn ModelLoader>,
    translation_spec: ModelSpec,
    summarization_spec: ModelSpec,
    translation: OnceCell<ModelHandle>,
    summarization: OnceCell<ModelHandle>,
}

impl ModelProvider {
    pub fn new(
        loader: Arc<dyn ModelLoader>,
        translation_model: impl Into<String>,
        summarization_model: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            translation_spec: ModelSpec::new(ModelKind::Translation, translation_model),
            summarization_spec: ModelSpec::new(ModelKind::Summarization, summarization_model),
            translation: OnceCell::new(),
            summarization: OnceCell::new(),
        }
    }

    /// Provider backed by the configured inference service
    pub fn from_config(config: &ModelsConfig) -> Result<Self> {
        let loader = Arc::new(super::RemoteModelLoader::new(config)?);
        Ok(Self::new(
            loader,
            config.translation_model.clone(),
            config.summarization_model.clone(),
        ))
    }

    pub async fn get_translation_model(&self) -> Result<ModelHandle> {
        Self::get_or_load(&self.translation, self.loader.as_ref(), &self.translation_spec).await
    }

    pub async fn get_summarization_model(&self) -> Result<ModelHandle> {
        Self::get_or_load(&self.summarization, self.loader.as_ref(), &self.summarization_spec).await
    }

    pub async fn health_check(&self) -> Result<bool> {
        self.loader.health_check().await
    }

    pub fn get(&self, kind: ModelKind) -> Option<ModelHandle> {
        match kind {
            ModelKind::Translation => self.translation.get().cloned(),
            ModelKind::Summarization => self.summarization.get().cloned(),
        }
    }

    async fn get_or_load(
        slot: &OnceCell<ModelHandle>,
        loader: &dyn ModelLoader,
        spec: &ModelSpec,
    ) -> Result<ModelHandle> {
        if let Some(handle) = slot.get() {
            return Ok(handle.clone());
        }

        let handle = slot
            .get_or_try_init(|| async {
                info!("Loading {} model {}", spec.kind, spec.model_id);
                let handle = loader.load(spec).await?;
                debug!("{} model {} ready", spec.kind, spec.model_id);
                Ok::<_, crate::Error>(handle)
            })
            .await?;

        Ok(handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenerationRequest, Seq2SeqModel};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct EchoModel {
        id: String,
    }

    #[async_trait::async_trait]
    impl Seq2SeqModel for EchoModel {
        fn model_id(&self) -> &str {
            &self.id
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            Ok(request.text.clone())
        }
    }

    /// Counts loads and fails the first `failures` attempts.
    struct CountingLoader {
        loads: AtomicUsize,
        failures: usize,
    }

    impl CountingLoader {
        fn new(failures: usize) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                failures,
            }
        }
    }

    #[async_trait::async_trait]
    impl ModelLoader for CountingLoader {
        async fn load(&self, spec: &ModelSpec) -> Result<ModelHandle> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if attempt < self.failures {
                return Err(crate::Error::ModelLoad("weights unavailable".to_string()));
            }
            Ok(Arc::new(EchoModel {
                id: spec.model_id.clone(),
            }))
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_return_same_instance() {
        let loader = Arc::new(CountingLoader::new(0));
        let provider = ModelProvider::new(loader.clone(), "m2m", "bart");

        let first = provider.get_translation_model().await.unwrap();
        let second = provider.get_translation_model().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.model_id(), "m2m");

        let summary_a = provider.get_summarization_model().await.unwrap();
        let summary_b = provider.get_summarization_model().await.unwrap();
        assert!(Arc::ptr_eq(&summary_a, &summary_b));
        assert_eq!(summary_a.model_id(), "bart");

        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_loads_once() {
        let loader = Arc::new(CountingLoader::new(0));
        let provider = Arc::new(ModelProvider::new(loader.clone(), "m2m", "bart"));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.get_translation_model().await })
            })
            .collect();

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap().unwrap());
        }

        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let loader = Arc::new(CountingLoader::new(1));
        let provider = ModelProvider::new(loader.clone(), "m2m", "bart");

        let err = provider.get_summarization_model().await.err().unwrap();
        assert!(matches!(err, crate::Error::ModelLoad(_)));
        assert!(provider.get(ModelKind::Summarization).is_none());

        let handle = provider.get_summarization_model().await.unwrap();
        assert_eq!(handle.model_id(), "bart");
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }
}
