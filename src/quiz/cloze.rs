use log::debug;
use rand::Rng;

use crate::quiz::sampler::{distinct_values, options_with, sample};
use crate::quiz::{Question, QuestionKind, BLANK};
use crate::yachts::{has_text, YachtRecord};

const DISTRACTORS_PER_BLANK: usize = 2;

const FIELDS: [fn(&YachtRecord) -> &str; 3] = [name, year_delivered, top_speed];

fn name(yacht: &YachtRecord) -> &str {
    &yacht.name
}

fn year_delivered(yacht: &YachtRecord) -> &str {
    &yacht.year_delivered
}

fn top_speed(yacht: &YachtRecord) -> &str {
    &yacht.top_speed
}

// "[BLANK] was delivered in [BLANK] and reaches a top speed of [BLANK]."
pub fn generate<R: Rng + ?Sized>(yachts: &[YachtRecord], start_id: usize, rng: &mut R) -> Vec<Question> {
    let qualifying = yachts
        .iter()
        .filter(|y| FIELDS.iter().all(|field| has_text(field(*y))))
        .collect::<Vec<_>>();
    let pools = FIELDS.map(|field| distinct_values(qualifying.iter().map(|y| field(*y))));
    let cloze_text = format!(
        "{} was delivered in {} and reaches a top speed of {}.",
        BLANK, BLANK, BLANK
    );

    let mut questions = Vec::new();
    'yachts: for yacht in qualifying {
        let mut cloze_options = Vec::with_capacity(FIELDS.len());
        let mut correct_answer = Vec::with_capacity(FIELDS.len());
        for (field, pool) in FIELDS.iter().zip(&pools) {
            let correct = field(yacht).to_string();
            let Some(distractors) = sample(pool, DISTRACTORS_PER_BLANK, Some(&correct), rng) else {
                continue 'yachts;
            };
            cloze_options.push(options_with(&correct, distractors, rng));
            correct_answer.push(correct);
        }

        questions.push(Question::new(
            start_id + questions.len(),
            "Fill in the blanks:".to_string(),
            Some(format!(
                "{} was delivered in {} and reaches a top speed of {}.",
                yacht.name, yacht.year_delivered, yacht.top_speed
            )),
            QuestionKind::Cloze {
                cloze_text: cloze_text.clone(),
                cloze_options,
                correct_answer,
            },
        ));
    }

    debug!("Generated {} cloze questions", questions.len());
    questions
}
