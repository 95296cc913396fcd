// src/grading.rs

use std::collections::HashMap;

use crate::models::question::{QuestionType, QuestionWithAnswers};

/// The graded result for a single question within a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub question_id: i64,

    /// The selected answer row for mcq questions. None for text questions
    /// and for mcq values that do not name an answer of this question.
    pub answer_id: Option<i64>,

    pub is_correct: bool,
}

/// Normalizes free-text input for comparison: surrounding whitespace is
/// trimmed and the text is lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Extracts the question id -> submitted value map from raw form fields.
///
/// The attempt form names its inputs `question_<id>`; everything else
/// (e.g. `user_name`) is ignored, as are fields whose id part does not
/// parse.
pub fn collect_submitted(form: &HashMap<String, String>) -> HashMap<i64, String> {
    form.iter()
        .filter_map(|(key, value)| {
            let id = key.strip_prefix("question_")?.parse::<i64>().ok()?;
            Some((id, value.clone()))
        })
        .collect()
}

/// Grades one attempt. Returns the total score and one outcome per
/// question, in question order.
///
/// * mcq: the submitted value must be the id of one of the question's own
///   answers; the selected row is recorded, and a correct row scores 1.
/// * text: the submitted value is compared, normalized, against the first
///   answer marked correct. No answer reference is recorded.
/// * A missing or garbled value, or a question with no correct answer on
///   file, grades as incorrect. Grading never fails.
pub fn grade(
    questions: &[QuestionWithAnswers],
    submitted: &HashMap<i64, String>,
) -> (i64, Vec<Outcome>) {
    let mut score = 0;
    let mut outcomes = Vec::with_capacity(questions.len());

    for qa in questions {
        let value = submitted.get(&qa.question.id).map(String::as_str);

        let outcome = match qa.question.question_type {
            QuestionType::Mcq => grade_mcq(qa, value),
            QuestionType::Text => grade_text(qa, value),
        };

        if outcome.is_correct {
            score += 1;
        }
        outcomes.push(outcome);
    }

    (score, outcomes)
}

fn grade_mcq(qa: &QuestionWithAnswers, value: Option<&str>) -> Outcome {
    let selected = value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|answer_id| qa.answers.iter().find(|a| a.id == answer_id));

    Outcome {
        question_id: qa.question.id,
        answer_id: selected.map(|a| a.id),
        is_correct: selected.is_some_and(|a| a.is_correct),
    }
}

fn grade_text(qa: &QuestionWithAnswers, value: Option<&str>) -> Outcome {
    let canonical = qa.answers.iter().find(|a| a.is_correct);

    let is_correct = match (value, canonical) {
        (Some(v), Some(a)) => normalize(v) == normalize(&a.text),
        _ => false,
    };

    Outcome {
        question_id: qa.question.id,
        answer_id: None,
        is_correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::Answer;
    use crate::models::question::Question;

    fn question(id: i64, question_type: QuestionType, answers: Vec<Answer>) -> QuestionWithAnswers {
        QuestionWithAnswers {
            question: Question {
                id,
                quiz_id: 1,
                text: format!("Question {}", id),
                question_type,
                created_at: chrono::Utc::now(),
            },
            answers,
        }
    }

    fn answer(id: i64, question_id: i64, text: &str, is_correct: bool) -> Answer {
        Answer {
            id,
            question_id,
            text: text.to_string(),
            is_correct,
        }
    }

    fn submitted(pairs: &[(i64, &str)]) -> HashMap<i64, String> {
        pairs
            .iter()
            .map(|(id, v)| (*id, v.to_string()))
            .collect()
    }

    #[test]
    fn mcq_correct_answer_scores() {
        let q = question(
            1,
            QuestionType::Mcq,
            vec![answer(10, 1, "Red", false), answer(11, 1, "Blue", true)],
        );

        let (score, outcomes) = grade(&[q], &submitted(&[(1, "11")]));

        assert_eq!(score, 1);
        assert_eq!(outcomes[0].answer_id, Some(11));
        assert!(outcomes[0].is_correct);
    }

    #[test]
    fn mcq_wrong_answer_records_selection() {
        let q = question(
            1,
            QuestionType::Mcq,
            vec![answer(10, 1, "Red", false), answer(11, 1, "Blue", true)],
        );

        let (score, outcomes) = grade(&[q], &submitted(&[(1, "10")]));

        assert_eq!(score, 0);
        assert_eq!(outcomes[0].answer_id, Some(10));
        assert!(!outcomes[0].is_correct);
    }

    #[test]
    fn mcq_foreign_answer_id_is_incorrect() {
        // Id 99 belongs to no answer of this question.
        let q = question(1, QuestionType::Mcq, vec![answer(10, 1, "Red", true)]);

        let (score, outcomes) = grade(&[q], &submitted(&[(1, "99")]));

        assert_eq!(score, 0);
        assert_eq!(outcomes[0].answer_id, None);
        assert!(!outcomes[0].is_correct);
    }

    #[test]
    fn mcq_garbled_value_is_incorrect() {
        let q = question(1, QuestionType::Mcq, vec![answer(10, 1, "Red", true)]);

        let (score, outcomes) = grade(&[q], &submitted(&[(1, "not-a-number")]));

        assert_eq!(score, 0);
        assert_eq!(outcomes[0].answer_id, None);
        assert!(!outcomes[0].is_correct);
    }

    #[test]
    fn text_match_is_whitespace_and_case_insensitive() {
        let q = question(2, QuestionType::Text, vec![answer(20, 2, "Paris", true)]);

        let (score, outcomes) = grade(&[q], &submitted(&[(2, "  pArIs ")]));

        assert_eq!(score, 1);
        assert_eq!(outcomes[0].answer_id, None);
        assert!(outcomes[0].is_correct);
    }

    #[test]
    fn text_uses_first_correct_answer_as_canonical() {
        let q = question(
            2,
            QuestionType::Text,
            vec![
                answer(20, 2, "Lyon", false),
                answer(21, 2, "Paris", true),
                answer(22, 2, "PARIS!", true),
            ],
        );

        let (score, _) = grade(&[q.clone()], &submitted(&[(2, "paris")]));
        assert_eq!(score, 1);

        let (score, _) = grade(&[q], &submitted(&[(2, "paris!")]));
        assert_eq!(score, 0);
    }

    #[test]
    fn text_without_canonical_answer_is_incorrect() {
        let q = question(2, QuestionType::Text, vec![answer(20, 2, "Paris", false)]);

        let (score, outcomes) = grade(&[q], &submitted(&[(2, "paris")]));

        assert_eq!(score, 0);
        assert!(!outcomes[0].is_correct);
    }

    #[test]
    fn missing_value_yields_incorrect_outcome() {
        let q1 = question(1, QuestionType::Mcq, vec![answer(10, 1, "Red", true)]);
        let q2 = question(2, QuestionType::Text, vec![answer(20, 2, "Paris", true)]);

        let (score, outcomes) = grade(&[q1, q2], &HashMap::new());

        assert_eq!(score, 0);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_correct));
    }

    #[test]
    fn score_equals_count_of_correct_outcomes() {
        let questions = vec![
            question(1, QuestionType::Mcq, vec![answer(10, 1, "A", true)]),
            question(2, QuestionType::Mcq, vec![answer(20, 2, "B", true)]),
            question(3, QuestionType::Text, vec![answer(30, 3, "Paris", true)]),
        ];
        let submitted = submitted(&[(1, "10"), (2, "999"), (3, "Paris")]);

        let (score, outcomes) = grade(&questions, &submitted);

        assert_eq!(score, 2);
        assert_eq!(
            score,
            outcomes.iter().filter(|o| o.is_correct).count() as i64
        );
    }

    #[test]
    fn collect_submitted_parses_question_fields_only() {
        let mut form = HashMap::new();
        form.insert("user_name".to_string(), "alice".to_string());
        form.insert("question_3".to_string(), "42".to_string());
        form.insert("question_x".to_string(), "junk".to_string());

        let submitted = collect_submitted(&form);

        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted.get(&3).map(String::as_str), Some("42"));
    }
}
