use log::debug;
use rand::Rng;

use crate::quiz::{Question, QuestionKind, Verdict};
use crate::yachts::YachtRecord;

const YEAR_SHIFT: i32 = 3;

// "X was delivered in Y.", about half of them with the year moved by three
pub fn generate<R: Rng + ?Sized>(yachts: &[YachtRecord], start_id: usize, rng: &mut R) -> Vec<Question> {
    let mut questions = Vec::new();

    for yacht in yachts {
        let Some(year) = yacht.delivery_year() else {
            continue;
        };
        let holds = rng.gen_bool(0.5);
        let stated = if holds {
            Some(year)
        } else if rng.gen_bool(0.5) {
            year.checked_add(YEAR_SHIFT)
        } else {
            year.checked_sub(YEAR_SHIFT)
        };
        // A year at the edge of i32 cannot be moved, the yacht is left out
        let Some(stated) = stated else {
            continue;
        };

        questions.push(Question::new(
            start_id + questions.len(),
            format!("{} was delivered in {}.", yacht.name, stated),
            Some(format!("{} was delivered in {}.", yacht.name, year)),
            QuestionKind::TrueFalse {
                correct_answer: Verdict::from(stated == year),
            },
        ));
    }

    debug!("Generated {} true/false questions", questions.len());
    questions
}
