// src/review.rs

//! Reconciles a completed attempt against the question definitions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    assembly::dedupe_question_ids,
    models::{
        exam::Exam,
        question::Question,
        result::{
            ExamAttempt, ExamResult, ExamReview, Outcome, QuestionOutcome, ReviewItem, ReviewOption,
            StudentAnswer,
        },
    },
    utils::html::clean_html,
};

/// Scores one question. A missing question definition is never an error:
/// any selection against it counts as incorrect.
pub fn reconcile_answer(
    question_id: i64,
    question: Option<&Question>,
    answer: Option<&StudentAnswer>,
) -> QuestionOutcome {
    let selected = answer.and_then(|a| a.selected_answer_id);
    let correct_id = question.and_then(Question::correct_answer).map(|a| a.id);

    let outcome = match selected {
        None => Outcome::Unanswered,
        Some(id) if Some(id) == correct_id => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
    };

    QuestionOutcome {
        question_id,
        outcome,
        is_correct: outcome == Outcome::Correct,
    }
}

/// Aggregates per-question outcomes into the attempt score.
pub fn summarize(
    outcomes: &[QuestionOutcome],
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
) -> ExamResult {
    let mut correct = 0u32;
    let mut incorrect = 0u32;
    let mut unanswered = 0u32;

    for outcome in outcomes {
        match outcome.outcome {
            Outcome::Correct => correct += 1,
            Outcome::Incorrect => incorrect += 1,
            Outcome::Unanswered => unanswered += 1,
        }
    }

    let total_questions = correct + incorrect + unanswered;
    let time_taken_seconds = match (started_at, submitted_at) {
        (Some(start), Some(end)) if end >= start => Some((end - start).num_seconds()),
        _ => None,
    };

    ExamResult {
        score: correct,
        max_score: total_questions,
        percentage: percentage(correct, total_questions),
        correct,
        incorrect,
        unanswered,
        total_questions,
        started_at,
        submitted_at,
        time_taken_seconds,
    }
}

/// `score / max_score * 100`, rounded to one decimal place.
pub fn percentage(score: u32, max_score: u32) -> f64 {
    if max_score == 0 {
        return 0.0;
    }
    let raw = f64::from(score) / f64::from(max_score) * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Builds the review screen for `attempt`.
///
/// Rows follow the exam's question order; an exam listing no questions falls
/// back to the order the attempt recorded answers in.
pub fn build_review(
    exam: &Exam,
    attempt: &ExamAttempt,
    questions: &[Question],
    fallback_label: &str,
) -> ExamReview {
    let by_id: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    let mut answers: HashMap<i64, &StudentAnswer> = HashMap::new();
    for answer in &attempt.answers {
        answers.entry(answer.question_id).or_insert(answer);
    }

    let order = review_order(exam, attempt);

    let stray = attempt
        .answers
        .iter()
        .filter(|a| !order.contains(&a.question_id))
        .count();
    if stray > 0 {
        tracing::debug!(
            "Attempt {} has {} answers outside exam {}",
            attempt.id,
            stray,
            exam.id
        );
    }

    let mut outcomes = Vec::with_capacity(order.len());
    let mut items = Vec::with_capacity(order.len());

    for (index, question_id) in order.iter().copied().enumerate() {
        let question = by_id.get(&question_id).copied();
        let answer = answers.get(&question_id).copied();
        let outcome = reconcile_answer(question_id, question, answer);

        items.push(review_item(
            index + 1,
            question_id,
            question,
            answer,
            outcome,
            fallback_label,
        ));
        outcomes.push(outcome);
    }

    ExamReview {
        attempt_id: attempt.id,
        exam_id: exam.id,
        exam_name: exam.name.clone(),
        student_id: attempt.student_id,
        result: summarize(&outcomes, attempt.started_at, attempt.submitted_at),
        items,
    }
}

/// Question ids the review covers, each once, in first-seen order.
pub fn review_order(exam: &Exam, attempt: &ExamAttempt) -> Vec<i64> {
    let ids: Vec<i64> = if exam.question_ids.is_empty() {
        attempt.answers.iter().map(|a| a.question_id).collect()
    } else {
        exam.question_ids.clone()
    };
    dedupe_question_ids(&ids)
}

fn review_item(
    position: usize,
    question_id: i64,
    question: Option<&Question>,
    answer: Option<&StudentAnswer>,
    outcome: QuestionOutcome,
    fallback_label: &str,
) -> ReviewItem {
    let selected_answer_id = answer.and_then(|a| a.selected_answer_id);

    let options: Vec<ReviewOption> = question
        .map(|q| {
            q.answers
                .iter()
                .map(|a| ReviewOption {
                    id: a.id,
                    text: text_or(&a.text, fallback_label),
                    is_correct: a.is_correct,
                    selected: Some(a.id) == selected_answer_id,
                })
                .collect()
        })
        .unwrap_or_default();

    let selected_answer_text = selected_answer_id.map(|id| {
        question
            .and_then(|q| q.answer(id))
            .map(|a| text_or(&a.text, fallback_label))
            .unwrap_or_else(|| fallback_label.to_string())
    });

    let correct_answer_text = question
        .and_then(Question::correct_answer)
        .map(|a| text_or(&a.text, fallback_label))
        .unwrap_or_else(|| fallback_label.to_string());

    ReviewItem {
        position,
        question_id,
        question_text: question
            .map(|q| text_or(&q.text, fallback_label))
            .unwrap_or_else(|| fallback_label.to_string()),
        passage: question
            .and_then(|q| q.passage.as_deref())
            .map(clean_html)
            .filter(|p| !p.trim().is_empty()),
        image_url: question.and_then(|q| q.image_url.clone()),
        audio_url: question.and_then(|q| q.audio_url.clone()),
        options,
        selected_answer_id,
        selected_answer_text,
        correct_answer_text,
        outcome: outcome.outcome,
        is_correct: outcome.is_correct,
        marked_for_review: answer.is_some_and(|a| a.marked_for_review),
    }
}

/// Sanitized `text`, or the fallback label when nothing visible remains.
fn text_or(text: &str, fallback_label: &str) -> String {
    let cleaned = clean_html(text);
    if cleaned.trim().is_empty() {
        fallback_label.to_string()
    } else {
        cleaned
    }
}
