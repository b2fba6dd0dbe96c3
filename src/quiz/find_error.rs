use log::debug;

use crate::quiz::{Question, QuestionKind};
use crate::yachts::{has_text, YachtRecord};

pub const ERROR_OPTIONS: [&str; 4] = ["Builder", "Year delivered", "Both", "None"];
const BOTH: &str = "Both";
const YEAR_SHIFT: i32 = 5;

// Both the builder and the year are wrong. The wrong builder is the first
// one in the table that differs from the real one.
pub fn generate(yachts: &[YachtRecord], start_id: usize) -> Vec<Question> {
    let mut questions = Vec::new();

    for yacht in yachts.iter().filter(|y| has_text(&y.name) && has_text(&y.builder)) {
        let Some(year) = yacht.delivery_year() else {
            continue;
        };
        let Some(wrong_year) = year.checked_add(YEAR_SHIFT) else {
            continue;
        };
        let Some(wrong_builder) = yachts
            .iter()
            .map(|other| other.builder.as_str())
            .find(|builder| has_text(builder) && *builder != yacht.builder)
        else {
            continue;
        };

        questions.push(Question::new(
            start_id + questions.len(),
            "What is wrong in this statement?".to_string(),
            Some(format!(
                "{} was built by {} and delivered in {}.",
                yacht.name, yacht.builder, year
            )),
            QuestionKind::FindError {
                error_text: format!(
                    "{} was built by {} and delivered in {}.",
                    yacht.name,
                    wrong_builder, wrong_year
                ),
                error_options: ERROR_OPTIONS.iter().map(|o| o.to_string()).collect(),
                correct_answer: BOTH.to_string(),
            },
        ));
    }

    debug!("Generated {} find-the-error questions", questions.len());
    questions
}
