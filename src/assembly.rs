// src/assembly.rs

//! Exam assembly: narrowing the question bank to a subject pool and picking
//! the questions an exam carries.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::question::Question;

/// Advisory notice raised when the selected question count differs from the
/// exam's declared total. Never blocks a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountWarning {
    pub declared_total: u32,
    pub selected: usize,
    pub message: CountMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CountMismatch {
    TooMany,
    TooFew,
}

/// Returns the questions belonging to `subject_id`, in bank order.
///
/// No subject means nothing can be selected yet, so the pool is empty.
pub fn filter_by_subject(questions: &[Question], subject_id: Option<i64>) -> Vec<Question> {
    let Some(subject_id) = subject_id else {
        return Vec::new();
    };

    questions
        .iter()
        .filter(|q| q.subject_id == Some(subject_id))
        .cloned()
        .collect()
}

/// Picks at most `target` items from `pool`.
///
/// * `pool.len() <= target`: the whole pool, in pool order.
/// * otherwise: `target` items sampled uniformly without replacement.
///
/// The sampling branch draws from the thread RNG on every call, so pressing
/// "random pick" again yields a fresh subset.
pub fn select_questions<T: Clone>(pool: &[T], target: usize) -> Vec<T> {
    select_with_rng(pool, target, &mut rand::rng())
}

fn select_with_rng<T: Clone, R: Rng + ?Sized>(pool: &[T], target: usize, rng: &mut R) -> Vec<T> {
    if pool.len() <= target {
        return pool.to_vec();
    }

    let mut scratch: Vec<&T> = pool.iter().collect();
    let (picked, _) = scratch.partial_shuffle(rng, target);
    picked.iter().map(|&item| item.clone()).collect()
}

/// Compares the number of selected questions against the declared total.
pub fn check_question_count(declared_total: u32, selected: usize) -> Option<CountWarning> {
    let declared = declared_total as usize;
    let message = match selected.cmp(&declared) {
        std::cmp::Ordering::Equal => return None,
        std::cmp::Ordering::Greater => CountMismatch::TooMany,
        std::cmp::Ordering::Less => CountMismatch::TooFew,
    };

    Some(CountWarning {
        declared_total,
        selected,
        message,
    })
}

/// Drops repeated ids, keeping the first occurrence of each.
pub fn dedupe_question_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    fn question(id: i64, subject_id: Option<i64>) -> Question {
        Question {
            id,
            text: format!("Question {}", id),
            image_url: None,
            audio_url: None,
            passage: None,
            difficulty: Some(Difficulty::Medium),
            subject_id,
            answers: Vec::new(),
        }
    }

    const MATH: i64 = 1;
    const PHYSICS: i64 = 2;

    fn bank() -> Vec<Question> {
        let mut bank: Vec<Question> = (1..=10).map(|id| question(id, Some(MATH))).collect();
        bank.extend((11..=15).map(|id| question(id, Some(PHYSICS))));
        bank.push(question(16, None));
        bank
    }

    fn ids(questions: &[Question]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn filter_keeps_only_matching_subject_in_order() {
        let pool = filter_by_subject(&bank(), Some(PHYSICS));
        assert_eq!(ids(&pool), vec![11, 12, 13, 14, 15]);
    }

    #[test]
    fn filter_without_subject_is_empty() {
        assert!(filter_by_subject(&bank(), None).is_empty());
    }

    #[test]
    fn filter_with_unknown_subject_is_empty() {
        assert!(filter_by_subject(&bank(), Some(99)).is_empty());
    }

    #[test]
    fn select_five_of_ten_math_questions() {
        let pool = filter_by_subject(&bank(), Some(MATH));
        let picked = select_questions(&pool, 5);

        assert_eq!(picked.len(), 5);
        let unique: HashSet<i64> = picked.iter().map(|q| q.id).collect();
        assert_eq!(unique.len(), 5);
        assert!(picked.iter().all(|q| q.subject_id == Some(MATH)));
    }

    #[test]
    fn select_returns_whole_pool_when_it_fits() {
        let pool: Vec<Question> = (1..=3).map(|id| question(id, Some(MATH))).collect();
        assert_eq!(select_questions(&pool, 10), pool);
        assert_eq!(select_questions(&pool, 3), pool);
    }

    #[test]
    fn select_zero_is_empty() {
        let pool = filter_by_subject(&bank(), Some(MATH));
        assert!(select_questions(&pool, 0).is_empty());
        assert!(select_questions::<Question>(&[], 0).is_empty());
    }

    #[test]
    fn select_size_and_subset_hold_for_all_targets() {
        let pool: Vec<i64> = (100..120).collect();
        for target in 0..=25 {
            for _ in 0..20 {
                let picked = select_questions(&pool, target);
                assert_eq!(picked.len(), target.min(pool.len()));

                let unique: HashSet<i64> = picked.iter().copied().collect();
                assert_eq!(unique.len(), picked.len());
                assert!(picked.iter().all(|id| pool.contains(id)));
            }
        }
    }

    #[test]
    fn select_rerolls_produce_different_subsets() {
        // 40 choose 5 subsets; 50 identical draws in a row would mean the
        // sampler is not random.
        let pool: Vec<i64> = (0..40).collect();
        let first: HashSet<i64> = select_questions(&pool, 5).into_iter().collect();
        let differs = (0..50).any(|_| {
            let next: HashSet<i64> = select_questions(&pool, 5).into_iter().collect();
            next != first
        });
        assert!(differs);
    }

    #[test]
    fn count_check_is_advisory() {
        assert_eq!(check_question_count(5, 5), None);

        let too_many = check_question_count(5, 7).unwrap();
        assert_eq!(too_many.message, CountMismatch::TooMany);
        assert_eq!(too_many.selected, 7);

        let too_few = check_question_count(5, 0).unwrap();
        assert_eq!(too_few.message, CountMismatch::TooFew);
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        assert_eq!(dedupe_question_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedupe_question_ids(&[]).is_empty());
    }
}
