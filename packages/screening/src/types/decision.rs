//! Screening decision - the structured output of the A3 stage.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaViolation, Stage};

/// Terminal screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Discard,
    Proceed,
}

/// Question count bounds when proceeding.
pub const QUESTIONS_MIN: usize = 6;
pub const QUESTIONS_MAX: usize = 10;

/// Word caps for the email drafts.
pub const INVESTOR_EMAIL_MAX_WORDS: usize = 200;
pub const REJECT_EMAIL_MAX_WORDS: usize = 180;

/// The A3 output bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningDecision {
    pub decision: Decision,

    /// Red flags citing the triggering finding indices with their
    /// source tier and confidence. Empty when proceeding cleanly.
    pub red_flags: Vec<String>,

    /// Diligence questions; 6-10 entries when proceeding.
    pub questions: Vec<String>,

    /// Short email to the investor summarizing findings and decision.
    pub investor_email_draft: String,

    /// Polite rejection to the founder; present only on discard.
    pub founder_reject_email_draft: Option<String>,
}

impl ScreeningDecision {
    /// Check the output contract before the bundle leaves the stage.
    pub fn validate(&self) -> std::result::Result<(), SchemaViolation> {
        if self.decision == Decision::Proceed
            && !(QUESTIONS_MIN..=QUESTIONS_MAX).contains(&self.questions.len())
        {
            return Err(SchemaViolation::new(
                Stage::Screening,
                format!(
                    "proceed requires {}-{} questions, got {}",
                    QUESTIONS_MIN,
                    QUESTIONS_MAX,
                    self.questions.len()
                ),
            ));
        }
        let investor_words = self.investor_email_draft.split_whitespace().count();
        if investor_words >= INVESTOR_EMAIL_MAX_WORDS {
            return Err(SchemaViolation::new(
                Stage::Screening,
                format!("investor email is {} words, cap is <{}", investor_words, INVESTOR_EMAIL_MAX_WORDS),
            ));
        }
        match (&self.decision, &self.founder_reject_email_draft) {
            (Decision::Proceed, Some(_)) => {
                return Err(SchemaViolation::new(
                    Stage::Screening,
                    "founder rejection draft present on a proceed decision",
                ));
            }
            (Decision::Discard, Some(draft)) => {
                let words = draft.split_whitespace().count();
                if words >= REJECT_EMAIL_MAX_WORDS {
                    return Err(SchemaViolation::new(
                        Stage::Screening,
                        format!("rejection email is {} words, cap is <{}", words, REJECT_EMAIL_MAX_WORDS),
                    ));
                }
            }
            (Decision::Discard, None) => {
                return Err(SchemaViolation::new(
                    Stage::Screening,
                    "discard decision is missing the founder rejection draft",
                ));
            }
            (Decision::Proceed, None) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proceed_with(questions: usize) -> ScreeningDecision {
        ScreeningDecision {
            decision: Decision::Proceed,
            red_flags: vec![],
            questions: (0..questions).map(|i| format!("Q{}?", i)).collect(),
            investor_email_draft: "Short summary.".into(),
            founder_reject_email_draft: None,
        }
    }

    #[test]
    fn proceed_requires_six_to_ten_questions() {
        assert!(proceed_with(5).validate().is_err());
        assert!(proceed_with(6).validate().is_ok());
        assert!(proceed_with(10).validate().is_ok());
        assert!(proceed_with(11).validate().is_err());
    }

    #[test]
    fn reject_draft_only_on_discard() {
        let mut decision = proceed_with(6);
        decision.founder_reject_email_draft = Some("Thanks, not a fit.".into());
        assert!(decision.validate().is_err());

        let discard = ScreeningDecision {
            decision: Decision::Discard,
            red_flags: vec!["[0] contradicted (major_press, high)".into()],
            questions: vec![],
            investor_email_draft: "Recommend discarding.".into(),
            founder_reject_email_draft: Some("Thank you for sharing your materials.".into()),
        };
        assert!(discard.validate().is_ok());

        let discard_missing_draft = ScreeningDecision {
            founder_reject_email_draft: None,
            ..discard
        };
        assert!(discard_missing_draft.validate().is_err());
    }

    #[test]
    fn email_word_caps_enforced() {
        let mut decision = proceed_with(6);
        decision.investor_email_draft = vec!["word"; 210].join(" ");
        assert!(decision.validate().is_err());
    }
}
