//! JSON bodies of the gallery backend endpoints.
//!
//! The viewer never performs these requests; the host page does, and feeds
//! the results back through the gallery state.

use serde::{Deserialize, Serialize};

pub const RETRIEVE_K_MIN: u32 = 1;
pub const RETRIEVE_K_MAX: u32 = 10;

/// `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn error_message(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        Some(self.error.as_deref().unwrap_or("Login failed"))
    }
}

/// `GET /session`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub logged_in: bool,
}

/// `POST /retrieve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveRequest {
    pub question: String,
    pub k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

impl RetrieveRequest {
    /// Builds a request with `k` clamped to the range the backend accepts.
    /// Returns `None` for a blank question.
    pub fn new(question: &str, k: Option<u32>, llm: Option<String>) -> Option<Self> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
            k: clamp_k(k),
            llm: llm.filter(|model| !model.trim().is_empty()),
            weight: None,
        })
    }
}

pub fn clamp_k(k: Option<u32>) -> u32 {
    k.unwrap_or(RETRIEVE_K_MIN)
        .clamp(RETRIEVE_K_MIN, RETRIEVE_K_MAX)
}

/// Image identifiers (paths or URLs) ranked by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveResponse {
    pub response: Vec<String>,
}

/// `POST /ask_llm`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskLlmRequest {
    pub question: String,
    pub context: String,
    pub llm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponse {
    pub response: String,
}

/// `POST /generate_program`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateProgramRequest {
    pub num_days: u32,
    pub theme: String,
    pub audience: String,
    pub context_type: String,
    pub context: String,
    pub llm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateProgramResponse {
    pub response: String,
    pub prompt: String,
}
