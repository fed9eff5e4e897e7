//! What a command hands back to the shell: text for the terminal, the
//! documented payload for JSON mode, an optional success toast and the request
//! a real backend would have received.

use serde::Serialize;
use serde_json::{Value, json};

use agora_shared::{ApiResponse, Endpoint};

use crate::error::UiResult;

/// The request behind an action, rendered from the API catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub endpoint: Endpoint,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub toast: Option<String>,
    pub data: Option<Value>,
    pub request: Option<SentRequest>,
}

impl Reply {
    /// A read-only view.
    pub fn view(text: impl Into<String>, data: &impl Serialize) -> UiResult<Self> {
        Ok(Self {
            text: text.into(),
            data: Some(serde_json::to_value(data)?),
            ..Self::default()
        })
    }

    /// A completed action announced by a success toast.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            toast: Some(message.into()),
            ..Self::default()
        }
    }

    /// Plain text with nothing behind it, e.g. form echoes.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_data(mut self, data: &impl Serialize) -> UiResult<Self> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    /// Record the documented request without a body.
    pub fn sent(mut self, endpoint: Endpoint, ids: &[u64]) -> Self {
        self.request = Some(SentRequest {
            endpoint,
            path: endpoint.info().path_for(ids),
            body: None,
        });
        self
    }

    /// Record a request whose path parameters are not ids.
    pub fn sent_to(
        mut self,
        endpoint: Endpoint,
        path: String,
        body: &impl Serialize,
    ) -> UiResult<Self> {
        self.request = Some(SentRequest {
            endpoint,
            path,
            body: Some(serde_json::to_value(body)?),
        });
        Ok(self)
    }

    /// Record the documented request together with its body.
    pub fn sent_with(
        self,
        endpoint: Endpoint,
        ids: &[u64],
        body: &impl Serialize,
    ) -> UiResult<Self> {
        let mut reply = self.sent(endpoint, ids);
        if let Some(request) = reply.request.as_mut() {
            request.body = Some(serde_json::to_value(body)?);
        }
        Ok(reply)
    }

    pub fn message(&self) -> &str {
        self.toast.as_deref().unwrap_or("Success")
    }

    /// The success envelope, preceded by the request when there was one.
    pub fn to_json(&self) -> UiResult<Value> {
        let response = match &self.data {
            Some(data) => serde_json::to_value(ApiResponse::ok(self.message(), data))?,
            None => serde_json::to_value(ApiResponse::done(self.message()))?,
        };
        Ok(match &self.request {
            Some(request) => json!({
                "request": {
                    "method": request.endpoint.info().method,
                    "path": request.path,
                    "body": request.body,
                },
                "response": response,
            }),
            None => response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_reply_carries_the_request() {
        let reply = Reply::done("User banned")
            .sent_with(Endpoint::UserBan, &[4], &json!({ "reason": "spam" }))
            .unwrap();
        let json = reply.to_json().unwrap();
        assert_eq!(json["request"]["method"], "POST");
        assert_eq!(json["request"]["path"], "/admin/users/4/ban");
        assert_eq!(json["response"]["resultCode"], "200000");
        assert_eq!(json["response"]["resultMessage"], "User banned");
        assert!(json["response"].get("data").is_none());
    }

    #[test]
    fn view_without_request_is_a_bare_envelope() {
        let reply = Reply::view("2 users", &vec![1, 2]).unwrap();
        let json = reply.to_json().unwrap();
        assert_eq!(json["resultMessage"], "Success");
        assert_eq!(json["data"], json!([1, 2]));
    }
}
