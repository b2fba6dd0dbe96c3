use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::{length_label, Question, QuestionKind};
use crate::yachts::{has_text, YachtRecord};

pub const ITEMS_PER_QUESTION: usize = 4;

// The answer lists, smallest first, where each item ended up in the display
pub fn generate<R: Rng + ?Sized>(yachts: &[YachtRecord], start_id: usize, rng: &mut R) -> Vec<Question> {
    let measured = yachts
        .iter()
        .filter(|y| has_text(&y.name))
        .filter_map(|y| y.length_metres().map(|metres| (y.name.as_str(), metres)))
        .collect::<Vec<_>>();

    let mut questions = Vec::new();
    for chunk in measured.chunks_exact(ITEMS_PER_QUESTION) {
        let mut sorted = chunk.to_vec();
        sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

        // display[p] is the sorted index shown at position p
        let mut display = (0..sorted.len()).collect::<Vec<_>>();
        display.shuffle(rng);

        let order_items = display
            .iter()
            .map(|&k| length_label(sorted[k].0, sorted[k].1))
            .collect();
        let mut correct_answer = vec![0; sorted.len()];
        for (position, &k) in display.iter().enumerate() {
            correct_answer[k] = position;
        }

        questions.push(Question::new(
            start_id + questions.len(),
            "Sort these yachts by length (smallest to largest):".to_string(),
            None,
            QuestionKind::Ordering {
                order_items,
                correct_answer,
            },
        ));
    }

    debug!("Generated {} ordering questions", questions.len());
    questions
}
