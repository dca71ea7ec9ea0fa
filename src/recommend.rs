//! Recommendation composer: prompt in, text out, never an error.

use std::sync::Arc;

use crate::clients::{CompletionError, CompletionService};
use crate::prompts::compose_prompt;
use crate::routine::RoutineSnapshot;
use crate::scoring;

pub const FALLBACK_RECOMMENDATION: &str =
    "AI Service Unavailable. Tip: Sleep more and study consistent hours.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationSource {
    Model,
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub text: String,
    pub source: RecommendationSource,
}

impl Recommendation {
    fn fallback(err: &CompletionError) -> Self {
        Self {
            text: FALLBACK_RECOMMENDATION.to_string(),
            source: RecommendationSource::Fallback {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RecommendationSource::Fallback { .. })
    }
}

#[derive(Clone)]
pub struct Recommender {
    service: Arc<dyn CompletionService>,
}

impl Recommender {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    pub fn provider(&self) -> &str {
        self.service.name()
    }

    /// Score the snapshot, ask the completion service once, and mask any
    /// failure with [`FALLBACK_RECOMMENDATION`].
    pub async fn recommend(&self, snapshot: &RoutineSnapshot) -> Recommendation {
        let score = scoring::score(snapshot);
        let prompt = compose_prompt(snapshot, score);

        match self.service.complete(&prompt).await {
            Ok(completion) => {
                tracing::debug!(
                    "recommendation generated by {} (model={:?}, chars={})",
                    self.service.name(),
                    completion.model,
                    completion.text.len()
                );
                Recommendation {
                    text: completion.text,
                    source: RecommendationSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!("generation error from {}: {}", self.service.name(), e);
                Recommendation::fallback(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{GeminiClient, ScriptedCompletion};
    use crate::routine::Role;

    #[tokio::test]
    async fn test_model_text_passes_through() {
        let svc = Arc::new(ScriptedCompletion::reply("[Brief Insight]\n- Solid day."));
        let rec = Recommender::new(svc.clone());
        let snap = RoutineSnapshot::new(8.0, 5.0, 2.0, 4).with_role(Role::Professional);

        let out = rec.recommend(&snap).await;
        assert_eq!(out.text, "[Brief Insight]\n- Solid day.");
        assert_eq!(out.source, RecommendationSource::Model);

        let prompt = svc.last_prompt().unwrap();
        assert!(prompt.contains("- Productivity score: 55/100"));
        assert!(prompt.contains(r#"ROLE = "PROFESSIONAL""#));
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let rec = Recommender::new(Arc::new(ScriptedCompletion::failing("dns failure")));
        let out = rec.recommend(&RoutineSnapshot::new(4.0, 2.0, 3.0, 1)).await;
        assert_eq!(out.text, FALLBACK_RECOMMENDATION);
        assert!(out.is_fallback());
        match out.source {
            RecommendationSource::Fallback { reason } => assert!(reason.contains("dns failure")),
            RecommendationSource::Model => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_uses_fallback() {
        let rec = Recommender::new(Arc::new(GeminiClient::new(None).unwrap()));
        let out = rec.recommend(&RoutineSnapshot::new(8.0, 5.0, 2.0, 4)).await;
        assert_eq!(out.text, FALLBACK_RECOMMENDATION);
        assert_eq!(rec.provider(), "gemini");
    }
}
