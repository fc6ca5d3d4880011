use serde_json::json;
use tracing::{error, info};

use knowledge_index::GuidelineIndexer;

use crate::error::TriageResult;
use crate::heuristics;
use crate::models::{Assessment, Question, QuestionAnswer, TriageLevel};
use crate::openai::AzureOpenAi;

/// Number of guideline passages injected into the prompt.
const RAG_TOP_K: usize = 3;

const QUESTION_TEMPERATURE: f64 = 0.3;
// Low temperature keeps the medical assessment consistent across runs.
const ASSESSMENT_TEMPERATURE: f64 = 0.1;

/// AI-powered medical triage engine with guideline grounding
pub struct TriageEngine {
    openai: AzureOpenAi,
    indexer: GuidelineIndexer,
}

impl TriageEngine {
    pub fn new(indexer: GuidelineIndexer) -> Self {
        Self {
            openai: AzureOpenAi::from_env(),
            indexer,
        }
    }

    pub fn with_client(openai: AzureOpenAi, indexer: GuidelineIndexer) -> Self {
        Self { openai, indexer }
    }

    pub fn is_model_configured(&self) -> bool {
        self.openai.is_configured()
    }

    /// Generate follow-up triage questions for the complaint.
    ///
    /// The model decides what to ask next from the complaint, the retrieved
    /// guidelines and any previous answers. Falls back to the local question
    /// banks when the model is unavailable.
    pub async fn generate_questions(
        &self,
        chief_complaint: &str,
        previous_answers: &[QuestionAnswer],
    ) -> Vec<Question> {
        if !self.openai.is_configured() {
            return heuristics::mock_questions(chief_complaint);
        }

        match self
            .model_questions(chief_complaint, previous_answers)
            .await
        {
            Ok(questions) if !questions.is_empty() => {
                info!(
                    count = questions.len(),
                    complaint = %truncate(chief_complaint, 50),
                    "Generated follow-up questions"
                );
                questions
            }
            Ok(_) => heuristics::mock_questions(chief_complaint),
            Err(err) => {
                error!(error = %err, "Question generation failed, using local question bank");
                heuristics::mock_questions(chief_complaint)
            }
        }
    }

    /// Produce the final triage assessment from all collected information.
    ///
    /// The returned triage level is validated; anything the model invents
    /// outside the three known levels is coerced to URGENT.
    pub async fn assess(
        &self,
        chief_complaint: &str,
        answers: &[QuestionAnswer],
    ) -> Assessment {
        if !self.openai.is_configured() {
            return heuristics::mock_assessment(chief_complaint, answers);
        }

        match self.model_assessment(chief_complaint, answers).await {
            Ok(assessment) => {
                info!(
                    level = %assessment.triage_level,
                    risk = assessment.risk_score,
                    complaint = %truncate(chief_complaint, 50),
                    "Triage assessment complete"
                );
                assessment
            }
            Err(err) => {
                error!(error = %err, "Model assessment failed, using local heuristics");
                heuristics::mock_assessment(chief_complaint, answers)
            }
        }
    }

    /// Retrieval step of the RAG pipeline: concatenated guideline passages
    /// for the complaint, with source headers.
    async fn retrieve_context(&self, query: &str) -> String {
        match self.indexer.search(query, RAG_TOP_K).await {
            Ok(hits) => hits
                .iter()
                .map(|hit| format!("--- Source: {} ---\n{}\n", hit.source, hit.content))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(err) => {
                error!(error = %err, "Guideline retrieval failed");
                String::new()
            }
        }
    }

    async fn model_questions(
        &self,
        chief_complaint: &str,
        previous_answers: &[QuestionAnswer],
    ) -> TriageResult<Vec<Question>> {
        let context = self.retrieve_context(chief_complaint).await;

        let mut answers_context = String::new();
        if !previous_answers.is_empty() {
            answers_context.push_str("\nPrevious patient answers:\n");
            for qa in previous_answers {
                answers_context.push_str(&format!("- Q: {} -> A: {}\n", qa.question, qa.answer));
            }
        }

        let system_prompt = format!(
            r#"You are an emergency medical triage AI assistant. Your role is to
ask focused follow-up questions to assess the severity of a patient's condition.

MEDICAL GUIDELINES (use ONLY these for clinical reasoning):
{}

RULES:
1. Generate 3-5 focused follow-up questions based on the chief complaint.
2. Questions must help determine triage level: EMERGENCY, URGENT, or ROUTINE.
3. Prioritize RED FLAG assessment questions first.
4. Keep questions simple - the patient may be in distress.
5. Each question should have a clear answer type.
6. Do NOT ask for information already provided.

OUTPUT FORMAT (strict JSON):
{{
  "questions": [
    {{
      "question": "Does the pain radiate to your arm, jaw, or back?",
      "type": "yes_no",
      "options": ["Yes", "No"],
      "clinical_rationale": "Assessing for cardiac radiation pattern"
    }}
  ]
}}
Allowed types: "yes_no", "scale", "multiple_choice", "free_text"."#,
            context_or_default(&context)
        );

        let user_message = format!(
            "Chief complaint: {}{}\n\nGenerate triage assessment questions.",
            chief_complaint, answers_context
        );

        let value = self
            .openai
            .chat_json(&system_prompt, &user_message, QUESTION_TEMPERATURE)
            .await?;

        let questions = value
            .get("questions")
            .cloned()
            .unwrap_or_else(|| json!([]));
        Ok(serde_json::from_value(questions)?)
    }

    async fn model_assessment(
        &self,
        chief_complaint: &str,
        answers: &[QuestionAnswer],
    ) -> TriageResult<Assessment> {
        let context = self.retrieve_context(chief_complaint).await;

        let answers_text = answers
            .iter()
            .map(|qa| format!("Q: {} -> A: {}", qa.question, qa.answer))
            .collect::<Vec<_>>()
            .join("\n");

        let system_prompt = format!(
            r#"You are an emergency medical triage AI. Analyze the patient's
symptoms and answers to determine the appropriate triage level.

MEDICAL GUIDELINES (use ONLY these for your assessment):
{}

ASSESSMENT RULES:
1. Base your assessment strictly on the guidelines provided.
2. Identify ALL red flags present.
3. Classify into: EMERGENCY, URGENT, or ROUTINE.
4. Provide a clear assessment summary.
5. Recommend specific actions.
6. Cite which guideline sections informed your decision.

OUTPUT FORMAT (strict JSON):
{{
  "triage_level": "EMERGENCY|URGENT|ROUTINE",
  "assessment": "Brief clinical assessment summary",
  "red_flags": ["list", "of", "identified", "red", "flags"],
  "recommended_action": "What the patient should do",
  "risk_score": 8,
  "source_guidelines": ["guideline sources used"],
  "suspected_conditions": ["possible conditions"],
  "time_sensitivity": "How urgent (e.g., 'Seek ER within 10 minutes')"
}}"#,
            context_or_default(&context)
        );

        let user_message = format!(
            "Chief complaint: {}\n\nPatient answers:\n{}\n\nProvide triage assessment.",
            chief_complaint, answers_text
        );

        let mut value = self
            .openai
            .chat_json(&system_prompt, &user_message, ASSESSMENT_TEMPERATURE)
            .await?;

        // Coerce an unknown triage level to URGENT before deserializing.
        let level_valid = value
            .get("triage_level")
            .and_then(|v| v.as_str())
            .and_then(TriageLevel::parse)
            .is_some();
        if !level_valid {
            if let Some(obj) = value.as_object_mut() {
                obj.insert("triage_level".to_string(), json!("URGENT"));
            }
        }

        Ok(serde_json::from_value(value)?)
    }
}

fn context_or_default(context: &str) -> &str {
    if context.is_empty() {
        "No specific guidelines available. Use general medical knowledge."
    } else {
        context
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_uses_general_knowledge_hint() {
        assert!(context_or_default("").contains("general medical knowledge"));
        assert_eq!(context_or_default("guideline text"), "guideline text");
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        assert_eq!(truncate("Brustschmerzen", 5), "Brust");
        assert_eq!(truncate("ağrı", 10), "ağrı");
    }
}
