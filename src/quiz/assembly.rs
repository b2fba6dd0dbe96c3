use log::info;
use rand::Rng;

use crate::quiz::{builder, cloze, comparison, find_error, image, matching, ordering, true_false};
use crate::quiz::Question;
use crate::yachts::{normalize, YachtRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    Builder,
    Matching,
    TrueFalse,
    Image,
    Ordering,
    Comparison,
    Cloze,
    FindError,
}

// Also the order of the questions in the batch
pub const GENERATION_ORDER: [QuestionType; 8] = [
    QuestionType::Builder,
    QuestionType::Matching,
    QuestionType::TrueFalse,
    QuestionType::Image,
    QuestionType::Ordering,
    QuestionType::Comparison,
    QuestionType::Cloze,
    QuestionType::FindError,
];

impl QuestionType {
    pub fn generate<R: Rng + ?Sized>(
        &self,
        yachts: &[YachtRecord],
        start_id: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        match self {
            QuestionType::Builder => builder::generate(yachts, start_id, rng),
            QuestionType::Matching => matching::generate(yachts, start_id),
            QuestionType::TrueFalse => true_false::generate(yachts, start_id, rng),
            QuestionType::Image => image::generate(yachts, start_id, rng),
            QuestionType::Ordering => ordering::generate(yachts, start_id, rng),
            QuestionType::Comparison => comparison::generate(yachts, start_id),
            QuestionType::Cloze => cloze::generate(yachts, start_id, rng),
            QuestionType::FindError => find_error::generate(yachts, start_id),
        }
    }
}

/// Builds the whole question batch from raw records.
///
/// Records are normalized first, then every generator runs in
/// [`GENERATION_ORDER`]. Ids run from "1" across the whole batch. No usable
/// records means no questions.
pub fn generate_questions<R: Rng + ?Sized>(records: Vec<YachtRecord>, rng: &mut R) -> Vec<Question> {
    generate_with(records, &GENERATION_ORDER, rng)
}

pub fn generate_with<R: Rng + ?Sized>(
    records: Vec<YachtRecord>,
    order: &[QuestionType],
    rng: &mut R,
) -> Vec<Question> {
    let yachts = normalize(records);
    if yachts.is_empty() {
        info!("No usable yachts, no questions generated");
        return Vec::new();
    }

    let mut questions = Vec::new();
    for question_type in order {
        let next_id = questions.len() + 1;
        questions.extend(question_type.generate(&yachts, next_id, rng));
    }

    info!(
        "Generated {} questions from {} yachts",
        questions.len(),
        yachts.len()
    );
    questions
}
