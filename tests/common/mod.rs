#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use study_spark::{routes, AppState, Config, GatewayError, TextGenerator};
use tower::ServiceExt;
use uuid::Uuid;

/// Plays back queued replies in order and records every prompt it saw.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn fail(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyResponse))
    }
}

pub struct TestApp {
    pub router: Router,
    pub generator: Arc<ScriptedGenerator>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let generator = ScriptedGenerator::new();
        let state = AppState::new(Config::default(), generator.clone());
        Self {
            router: routes::create_router(state.clone()),
            generator,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn create_session(&self) -> Uuid {
        let (status, body) = self.post("/api/sessions").await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().parse().unwrap()
    }
}

/// Three questions whose correct answers are 0, 1 and 2.
pub const THREE_QUESTIONS: &str = r#"Here you go:
[
  {"question": "What gas do plants absorb?", "options": ["CO2", "O2", "N2", "He"], "correct_answer": 0, "explanation": "Plants take in carbon dioxide."},
  {"question": "Where does photosynthesis happen?", "options": ["Nucleus", "Chloroplast", "Ribosome", "Vacuole"], "correct_answer": 1, "explanation": "In the chloroplasts."},
  {"question": "What pigment is green?", "options": ["Carotene", "Melanin", "Chlorophyll", "Keratin"], "correct_answer": 2, "explanation": "Chlorophyll reflects green light."}
]
Hope that helps!"#;

pub fn flashcards_json(count: usize) -> String {
    let cards: Vec<Value> = (0..count)
        .map(|i| serde_json::json!({ "front": format!("Term {}", i), "back": format!("Definition {}", i) }))
        .collect();
    Value::Array(cards).to_string()
}
