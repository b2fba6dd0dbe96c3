use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::quiz::sampler::{distinct_values, options_with, sample};
use crate::quiz::{Question, QuestionKind};
use crate::yachts::YachtRecord;

const DISTRACTORS: usize = 3;

// A yacht listed twice is asked about once
pub fn generate<R: Rng + ?Sized>(yachts: &[YachtRecord], start_id: usize, rng: &mut R) -> Vec<Question> {
    let builders = distinct_values(yachts.iter().map(|y| y.builder.as_str()));
    let mut asked = HashSet::new();
    let mut questions = Vec::new();

    for yacht in yachts {
        if yacht.builder.is_empty() || !asked.insert(yacht.name.as_str()) {
            continue;
        }
        let Some(wrong_builders) = sample(&builders, DISTRACTORS, Some(&yacht.builder), rng) else {
            continue;
        };

        questions.push(Question::new(
            start_id + questions.len(),
            format!("Who built {}?", yacht.name),
            Some(format!("{} was built by {}.", yacht.name, yacht.builder)),
            QuestionKind::MultipleChoice {
                options: options_with(&yacht.builder, wrong_builders, rng),
                correct_answer: yacht.builder.clone(),
            },
        ));
    }

    debug!("Generated {} builder questions", questions.len());
    questions
}
