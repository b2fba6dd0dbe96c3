use log::debug;
use rand::Rng;

use crate::quiz::sampler::{distinct_values, options_with, sample};
use crate::quiz::{Question, QuestionKind};
use crate::yachts::{has_text, YachtRecord};

const DISTRACTORS: usize = 3;

pub fn generate<R: Rng + ?Sized>(yachts: &[YachtRecord], start_id: usize, rng: &mut R) -> Vec<Question> {
    let names = distinct_values(yachts.iter().map(|y| y.name.as_str()));
    let mut questions = Vec::new();

    for yacht in yachts
        .iter()
        .filter(|y| has_text(&y.name) && has_text(&y.profile_picture))
    {
        let Some(wrong_names) = sample(&names, DISTRACTORS, Some(&yacht.name), rng) else {
            continue;
        };

        questions.push(Question::new(
            start_id + questions.len(),
            "Which yacht is shown in this picture?".to_string(),
            Some(format!("This is {}.", yacht.name)),
            QuestionKind::ImageIdentification {
                image: yacht.profile_picture.clone(),
                options: options_with(&yacht.name, wrong_names, rng),
                correct_answer: yacht.name.clone(),
            },
        ));
    }

    debug!("Generated {} image questions", questions.len());
    questions
}
