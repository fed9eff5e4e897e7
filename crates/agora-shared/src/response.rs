//! The `{ resultCode, resultMessage, data? }` envelope every documented
//! response uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use agora_core::DomainError;

/// Six-digit result code. The first three digits follow the HTTP status the
/// response would carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    InvalidRequest,
    MissingField,
    Forbidden,
    NotFound,
    Conflict,
    ServerError,
}

impl ResultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::Success => "200000",
            ResultCode::InvalidRequest => "400001",
            ResultCode::MissingField => "400002",
            ResultCode::Forbidden => "403001",
            ResultCode::NotFound => "404003",
            ResultCode::Conflict => "409001",
            ResultCode::ServerError => "500000",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ResultCode::Success => 200,
            ResultCode::InvalidRequest | ResultCode::MissingField => 400,
            ResultCode::Forbidden => 403,
            ResultCode::NotFound => 404,
            ResultCode::Conflict => 409,
            ResultCode::ServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == ResultCode::Success
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown result code `{0}`")]
pub struct UnknownResultCode(String);

impl FromStr for ResultCode {
    type Err = UnknownResultCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "200000" => ResultCode::Success,
            "400001" => ResultCode::InvalidRequest,
            "400002" => ResultCode::MissingField,
            "403001" => ResultCode::Forbidden,
            "404003" => ResultCode::NotFound,
            "409001" => ResultCode::Conflict,
            "500000" => ResultCode::ServerError,
            other => return Err(UnknownResultCode(other.to_string())),
        })
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResultCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<&DomainError> for ResultCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => ResultCode::NotFound,
            DomainError::MissingField(_) => ResultCode::MissingField,
            DomainError::Validation(_) => ResultCode::InvalidRequest,
            DomainError::Forbidden(_) => ResultCode::Forbidden,
            DomainError::Conflict(_) => ResultCode::Conflict,
            DomainError::Internal(_) => ResultCode::ServerError,
        }
    }
}

/// Standard response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub result_code: ResultCode,
    pub result_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            result_code: ResultCode::Success,
            result_message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            result_code: code,
            result_message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result_code.is_success()
    }

    /// The payload of a successful response, or the failure as
    /// `(code, message)`.
    pub fn into_result(self) -> Result<T, (ResultCode, String)> {
        match (self.result_code, self.data) {
            (ResultCode::Success, Some(data)) => Ok(data),
            (ResultCode::Success, None) => Err((
                ResultCode::ServerError,
                "successful response carried no data".to_string(),
            )),
            (code, _) => Err((code, self.result_message)),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. a status change.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            result_code: ResultCode::Success,
            result_message: message.into(),
            data: None,
        }
    }
}

impl<T> From<DomainError> for ApiResponse<T> {
    fn from(err: DomainError) -> Self {
        Self::error(ResultCode::from(&err), err.to_string())
    }
}
