use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    /// Validation failures and refused actions.
    Destructive,
}

/// A transient notice shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: Uuid,
    pub variant: ToastVariant,
    pub description: String,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant: ToastVariant::Default,
            description: description.into(),
        }
    }

    pub fn destructive(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant: ToastVariant::Destructive,
            description: description.into(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Where pages send their toasts.
#[async_trait]
pub trait ToastSink: Send + Sync {
    async fn push(&self, toast: Toast) -> Result<(), ToastError>;

    /// Toasts pushed since the last call, oldest first.
    async fn take_pending(&self) -> Vec<Toast>;

    /// Everything still retained, oldest first.
    async fn history(&self) -> Vec<Toast>;
}

/// Toast delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error("Toast sink closed")]
    Closed,
}
