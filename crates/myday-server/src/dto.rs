use serde::{Deserialize, Serialize};

/// Body returned for acknowledgements such as delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub message: String,
    /// ISO-8601 UTC with millisecond precision.
    pub timestamp: String,
}

/// `GET /health` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HealthComponents,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthComponents {
    pub database: String,
}

impl HealthResponse {
    pub fn from_store(db_ok: bool) -> Self {
        Self {
            status: if db_ok { "healthy" } else { "degraded" }.to_string(),
            components: HealthComponents {
                database: if db_ok { "ok" } else { "error" }.to_string(),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
