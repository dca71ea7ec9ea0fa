//! Deterministic, local completion service for tests and offline runs (no network)

use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::traits::{Completion, CompletionError, CompletionService};

enum Script {
    Reply(String),
    /// Error text; replayed as `CompletionError::Http`
    Fail(String),
}

pub struct ScriptedCompletion {
    script: Script,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedCompletion {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            script: Script::Reply(text.into()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            last_prompt: Mutex::new(None),
        }
    }

    /// Canned reply used when the service runs with `provider = "offline"`
    pub fn offline() -> Self {
        Self::reply(
            "[Brief Insight]\n- Offline mode: no model was consulted.\n\n\
             [Key Observation]\n- Your routine was scored locally.\n\n\
             [Actionable Recommendations]\n- Keep a steady sleep schedule.\n- Plan focused blocks.\n\n\
             [Motivation/Tip]\n- Small consistent steps add up.",
        )
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        match &self.script {
            Script::Reply(text) => Ok(Completion {
                text: text.clone(),
                model: Some("scripted".to_string()),
            }),
            Script::Fail(message) => Err(CompletionError::Http(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_records_prompt() {
        let svc = ScriptedCompletion::reply("hi");
        let out = svc.complete("prompt text").await.unwrap();
        assert_eq!(out.text, "hi");
        assert_eq!(svc.last_prompt().as_deref(), Some("prompt text"));
    }

    #[tokio::test]
    async fn test_failing_returns_error() {
        let svc = ScriptedCompletion::failing("connection refused");
        let err = svc.complete("x").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
