//! Stub models and fixture documents for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::model::{GenerationRequest, ModelHandle, ModelKind, ModelLoader, ModelSpec, Seq2SeqModel};
use crate::{Error, Result};

/// Records every request and answers with a fixed reply (or a failure).
pub struct RecordingModel {
    reply: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl RecordingModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn handle(self: &Arc<Self>) -> ModelHandle {
        self.clone()
    }
}

#[async_trait::async_trait]
impl Seq2SeqModel for RecordingModel {
    fn model_id(&self) -> &str {
        "recording"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| Error::ModelInference("CUDA out of memory".to_string()))
    }
}

/// Hands out fixed models per kind and counts how often it was asked.
pub struct StaticLoader {
    translation: ModelHandle,
    summarization: ModelHandle,
    loads: AtomicUsize,
}

impl StaticLoader {
    pub fn new(translation: ModelHandle, summarization: ModelHandle) -> Arc<Self> {
        Arc::new(Self {
            translation,
            summarization,
            loads: AtomicUsize::new(0),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelLoader for StaticLoader {
    async fn load(&self, spec: &ModelSpec) -> Result<ModelHandle> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(match spec.kind {
            ModelKind::Translation => self.translation.clone(),
            ModelKind::Summarization => self.summarization.clone(),
        })
    }
}

/// A loader for an inference service that is down.
pub struct UnavailableLoader {
    attempts: AtomicUsize,
}

impl UnavailableLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelLoader for UnavailableLoader {
    async fn load(&self, _spec: &ModelSpec) -> Result<ModelHandle> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::ModelLoad("service down".to_string()))
    }
}

/// Build a PDF with one page per entry; empty entries get no text at all.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
