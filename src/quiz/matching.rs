use log::debug;

use crate::quiz::{MatchingPair, Question, QuestionKind};
use crate::yachts::{has_text, YachtRecord};

pub const PAIRS_PER_QUESTION: usize = 4;

pub fn generate(yachts: &[YachtRecord], start_id: usize) -> Vec<Question> {
    let owned = yachts
        .iter()
        .filter(|y| has_text(&y.owner))
        .collect::<Vec<_>>();

    let questions = owned
        .chunks_exact(PAIRS_PER_QUESTION)
        .enumerate()
        .map(|(i, chunk)| {
            let matching_pairs = chunk
                .iter()
                .map(|y| MatchingPair {
                    left: y.name.clone(),
                    right: y.owner.clone(),
                })
                .collect::<Vec<_>>();
            let correct_answer = matching_pairs.iter().map(|p| p.right.clone()).collect();
            Question::new(
                start_id + i,
                "Match each yacht to its owner:".to_string(),
                None,
                QuestionKind::Matching {
                    matching_pairs,
                    correct_answer,
                },
            )
        })
        .collect::<Vec<_>>();

    debug!(
        "Generated {} matching questions, {} owners left over",
        questions.len(),
        owned.len() % PAIRS_PER_QUESTION
    );
    questions
}
