//! Wire types shared by the HTTP service and its client adapter.
//! HTTP 服务与客户端适配器共享的传输类型。

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Response envelope used by every service endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwraps the payload, turning a failure envelope or a success
    /// envelope without data into an error.
    pub fn into_result(self) -> anyhow::Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(anyhow::anyhow!("Malformed response: missing data")),
            (false, _) => Err(anyhow::anyhow!(
                "Service error: {}",
                self.error.unwrap_or_else(|| "unknown".to_string())
            )),
        }
    }
}

/// Query string of `GET /lists/{list}/records`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecordsParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub cursor: Option<i64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertBatchRequest {
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedCount {
    pub deleted: u64,
}
