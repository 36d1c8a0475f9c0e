use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned for every failed API call: `{ "message": "..." }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
