//! Three-tier answer generation.
//!
//! Generation is an ordered walk over [`Tier`]s, each attempt returning a
//! tagged [`TierOutcome`] instead of raising: a tier is `Unavailable` when
//! its structural precondition is missing (no backend loaded, no context
//! retrieved) and `Failed` when it ran and broke (API error, timeout,
//! blank output). The walker takes the first success; the final tier
//! always succeeds, so [`AnswerGenerator::generate`] is infallible.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use faso_model::{GenerationParams, LanguageModel};
use faso_rag::{RetrievedMatch, SourceRef};

/// Fixed lead-in of the template tier.
const TEMPLATE_LEAD_IN: &str = "Basé sur les informations disponibles: ";

/// Length bound of the template tier's context excerpt, in characters.
const TEMPLATE_EXCERPT_CHARS: usize = 200;

/// Conversational triggers and their fixed responses, checked in order
/// with case-insensitive substring matching.
const TRIGGER_RESPONSES: &[(&str, &str)] = &[
    (
        "bonjour",
        "Bonjour! Je suis votre assistant touristique pour le Burkina Faso. Comment puis-je vous aider?",
    ),
    (
        "salut",
        "Salut! Bienvenue. Je suis ici pour répondre à vos questions sur le tourisme au Burkina Faso.",
    ),
    ("merci", "De rien! N'hésitez pas à me poser d'autres questions."),
    ("au revoir", "Au revoir! Bon voyage au Burkina Faso!"),
];

/// Fixed response when nothing matched, inviting reformulation.
const NO_INFORMATION: &str = "Je ne dispose pas d'informations spécifiques sur ce sujet. \
                              Pouvez-vous poser une question relative au tourisme au Burkina Faso?";

/// The answer tiers, in attempt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Prompt a language-generation backend with the retrieved context.
    Llm,
    /// Deterministic templated sentence over a context excerpt.
    Template,
    /// Conversational triggers or the fixed no-information message.
    Fallback,
}

/// The result of attempting one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    /// The tier produced an answer.
    Success(String),
    /// The tier's structural precondition is missing; skip without logging
    /// a failure.
    Unavailable,
    /// The tier ran and broke; fall through to the next one.
    Failed(String),
}

/// A generated answer with its provenance.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The answer text.
    pub response: String,
    /// Source citations projected from the context documents, independent
    /// of which tier produced the text.
    pub sources: Vec<SourceRef>,
    /// Whether retrieved context actually grounded the answer (tier 1 or
    /// 2 with non-empty context; the fallback tier never sets this).
    pub context_used: bool,
    /// The tier that produced the answer.
    pub tier: Tier,
}

/// Generates answers from retrieved context with graceful degradation.
pub struct AnswerGenerator {
    model: Option<Arc<dyn LanguageModel>>,
    params: GenerationParams,
    timeout: Duration,
}

impl AnswerGenerator {
    /// Create a generator. `model` is optional: without a backend the LLM
    /// tier reports `Unavailable` and answers come from the template tier.
    pub fn new(
        model: Option<Arc<dyn LanguageModel>>,
        params: GenerationParams,
        timeout: Duration,
    ) -> Self {
        Self { model, params, timeout }
    }

    /// Generate an answer for `query` grounded in `context`.
    ///
    /// Never fails: tier failures are logged and absorbed by the walk, and
    /// the fallback tier always produces text.
    pub async fn generate(&self, query: &str, context: &[RetrievedMatch]) -> Answer {
        let context_text = build_context(context);

        let mut chosen = Tier::Fallback;
        let mut response = None;
        for tier in [Tier::Llm, Tier::Template, Tier::Fallback] {
            match self.attempt(tier, query, &context_text).await {
                TierOutcome::Success(text) => {
                    chosen = tier;
                    response = Some(text);
                    break;
                }
                TierOutcome::Unavailable => {}
                TierOutcome::Failed(reason) => {
                    warn!(?tier, %reason, "answer tier failed, falling through");
                }
            }
        }
        // The fallback tier always succeeds.
        let response = response.unwrap_or_else(|| NO_INFORMATION.to_string());

        let context_used = !context.is_empty() && chosen != Tier::Fallback;
        info!(tier = ?chosen, context_docs = context.len(), context_used, "answer generated");

        Answer {
            response,
            sources: context.iter().map(RetrievedMatch::to_source).collect(),
            context_used,
            tier: chosen,
        }
    }

    async fn attempt(&self, tier: Tier, query: &str, context_text: &str) -> TierOutcome {
        match tier {
            Tier::Llm => {
                let Some(model) = &self.model else {
                    return TierOutcome::Unavailable;
                };
                if context_text.is_empty() {
                    return TierOutcome::Unavailable;
                }

                let prompt = build_prompt(query, context_text);
                match timeout(self.timeout, model.complete(&prompt, &self.params)).await {
                    Ok(Ok(text)) if !text.trim().is_empty() => {
                        TierOutcome::Success(text.trim().to_string())
                    }
                    Ok(Ok(_)) => TierOutcome::Failed("backend returned blank output".into()),
                    Ok(Err(e)) => TierOutcome::Failed(e.to_string()),
                    Err(_) => {
                        TierOutcome::Failed(format!("timed out after {:?}", self.timeout))
                    }
                }
            }
            Tier::Template => {
                if context_text.is_empty() {
                    return TierOutcome::Unavailable;
                }
                let excerpt: String =
                    context_text.chars().take(TEMPLATE_EXCERPT_CHARS).collect();
                TierOutcome::Success(format!("{TEMPLATE_LEAD_IN}{excerpt}..."))
            }
            Tier::Fallback => {
                let query_lower = query.to_lowercase();
                let response = TRIGGER_RESPONSES
                    .iter()
                    .find(|(trigger, _)| query_lower.contains(trigger))
                    .map(|(_, response)| *response)
                    .unwrap_or(NO_INFORMATION);
                TierOutcome::Success(response.to_string())
            }
        }
    }
}

/// Concatenate context documents, each under a 1-based ordinal label.
fn build_context(context: &[RetrievedMatch]) -> String {
    context
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("Document {}:\n{}", i + 1, doc.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assemble the continuation prompt: context, the literal question, then
/// the answer lead-in the backend is expected to continue.
fn build_prompt(query: &str, context_text: &str) -> String {
    format!("Contexte:\n{context_text}\n\nQuestion: {query}\n\nRéponse basée sur le contexte:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use faso_model::MockModel;
    use faso_rag::DocMetadata;

    fn doc(id: &str, text: &str, similarity: f32) -> RetrievedMatch {
        RetrievedMatch {
            id: id.to_string(),
            text: text.to_string(),
            metadata: DocMetadata {
                title: format!("Titre {id}"),
                url: format!("https://example.org/{id}"),
                ..DocMetadata::default()
            },
            similarity,
        }
    }

    fn generator(model: Option<Arc<dyn LanguageModel>>) -> AnswerGenerator {
        AnswerGenerator::new(model, GenerationParams::default(), Duration::from_secs(5))
    }

    #[test]
    fn context_and_prompt_carry_ordinal_labels() {
        let context = vec![doc("a", "Premier texte.", 0.9), doc("b", "Deuxième texte.", 0.8)];
        let text = build_context(&context);
        assert_eq!(text, "Document 1:\nPremier texte.\n\nDocument 2:\nDeuxième texte.");

        let prompt = build_prompt("Quelle question?", &text);
        assert!(prompt.starts_with("Contexte:\nDocument 1:"));
        assert!(prompt.contains("\n\nQuestion: Quelle question?\n\n"));
        assert!(prompt.ends_with("Réponse basée sur le contexte:"));
    }

    #[tokio::test]
    async fn llm_tier_answers_when_backend_succeeds() {
        let model = Arc::new(MockModel::with_response("Ouagadougou est la capitale."));
        let answer = generator(Some(model)).generate("capitale?", &[doc("a", "texte", 0.9)]).await;

        assert_eq!(answer.tier, Tier::Llm);
        assert_eq!(answer.response, "Ouagadougou est la capitale.");
        assert!(answer.context_used);
    }

    #[tokio::test]
    async fn failing_backend_falls_through_to_template_byte_identical() {
        let context = vec![doc("a", "Ouagadougou est la capitale du Burkina Faso.", 0.9)];

        let with_failing: Arc<dyn LanguageModel> = Arc::new(MockModel::failing());
        let degraded = generator(Some(with_failing)).generate("capitale?", &context).await;
        let template_only = generator(None).generate("capitale?", &context).await;

        assert_eq!(degraded.tier, Tier::Template);
        assert_eq!(degraded.response, template_only.response);
        assert!(degraded.context_used);
        assert!(template_only.context_used);
    }

    #[tokio::test]
    async fn timeout_behaves_like_a_tier_failure() {
        struct SlowModel;

        #[async_trait::async_trait]
        impl LanguageModel for SlowModel {
            async fn complete(
                &self,
                _prompt: &str,
                _params: &GenerationParams,
            ) -> faso_model::Result<String> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("trop tard".into())
            }

            fn name(&self) -> &str {
                "slow"
            }
        }

        let slow = AnswerGenerator::new(
            Some(Arc::new(SlowModel)),
            GenerationParams::default(),
            Duration::from_millis(10),
        );
        let answer = slow.generate("capitale?", &[doc("a", "texte assez long", 0.9)]).await;
        assert_eq!(answer.tier, Tier::Template);
        assert!(answer.context_used);
    }

    #[tokio::test]
    async fn template_excerpt_is_bounded_and_char_safe() {
        let long = "é".repeat(500);
        let answer = generator(None).generate("question", &[doc("a", &long, 0.9)]).await;

        let expected_excerpt: String =
            format!("Document 1:\n{long}").chars().take(200).collect();
        assert_eq!(answer.response, format!("{TEMPLATE_LEAD_IN}{expected_excerpt}..."));
    }

    #[tokio::test]
    async fn empty_context_always_falls_back_even_with_backend() {
        let model = Arc::new(MockModel::with_response("réponse inventée"));
        let answer = generator(Some(model)).generate("Quelle heure est-il?", &[]).await;

        assert_eq!(answer.tier, Tier::Fallback);
        assert_eq!(answer.response, NO_INFORMATION);
        assert!(!answer.context_used);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn conversational_triggers_match_case_insensitively() {
        let g = generator(None);

        let greeting = g.generate("BONJOUR tout le monde", &[]).await;
        assert_eq!(greeting.response, TRIGGER_RESPONSES[0].1);

        let thanks = g.generate("Merci beaucoup!", &[]).await;
        assert_eq!(thanks.response, TRIGGER_RESPONSES[2].1);

        let farewell = g.generate("au revoir", &[]).await;
        assert_eq!(farewell.response, TRIGGER_RESPONSES[3].1);
        assert!(!farewell.context_used);
    }

    #[tokio::test]
    async fn sources_are_projected_regardless_of_tier() {
        let mut context = vec![doc("a", "texte avec titre", 0.72)];
        context[0].metadata.title.clear();

        let answer = generator(None).generate("question", &context).await;
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].title, "Source");
        assert_eq!(answer.sources[0].url, "https://example.org/a");
        assert!((answer.sources[0].similarity - 0.72).abs() < f32::EPSILON);
    }
}
