//! Success envelope shared by every route.

use serde::{Deserialize, Serialize};

/// `{ "result": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}
