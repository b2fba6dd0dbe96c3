use log::debug;

use crate::quiz::{ComparisonItem, Question, QuestionKind};
use crate::yachts::{has_text, YachtRecord};

const UNIT: &str = "knots";

// Equal speeds have no faster yacht, such pairs are skipped
pub fn generate(yachts: &[YachtRecord], start_id: usize) -> Vec<Question> {
    let timed = yachts
        .iter()
        .filter(|y| has_text(&y.name))
        .filter_map(|y| y.top_speed_knots().map(|knots| (y, knots)))
        .collect::<Vec<_>>();

    let mut ties = 0;
    let mut questions = Vec::new();
    for pair in timed.windows(2) {
        let [(first, first_knots), (second, second_knots)] = pair else {
            continue;
        };
        let ((faster, faster_knots), (slower, slower_knots)) = if first_knots > second_knots {
            ((*first, *first_knots), (*second, *second_knots))
        } else if second_knots > first_knots {
            ((*second, *second_knots), (*first, *first_knots))
        } else {
            ties += 1;
            continue;
        };

        let item = |yacht: &YachtRecord, knots: f64| ComparisonItem {
            name: yacht.name.clone(),
            value: knots.to_string(),
            unit: UNIT.to_string(),
        };
        questions.push(Question::new(
            start_id + questions.len(),
            "Which yacht is faster?".to_string(),
            Some(format!(
                "{} reaches {} knots, {} reaches {}.",
                faster.name, faster_knots, slower.name, slower_knots
            )),
            QuestionKind::Comparison {
                comparison_items: vec![item(*first, *first_knots), item(*second, *second_knots)],
                correct_answer: faster.name.clone(),
            },
        ));
    }

    debug!("Generated {} comparison questions, skipped {} ties", questions.len(), ties);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::yacht;
    use crate::quiz::Answer;

    fn with_speed(name: &str, speed: &str) -> YachtRecord {
        YachtRecord {
            top_speed: speed.to_string(),
            ..yacht(name, "Lürssen")
        }
    }

    #[test]
    fn faster_yacht_is_the_answer() {
        let yachts = vec![with_speed("Eclipse", "20"), with_speed("Azzam", "33")];
        let questions = generate(&yachts, 1);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer(), Answer::Choice("Azzam".into()));

        let QuestionKind::Comparison { comparison_items, .. } = &questions[0].kind else {
            panic!("unexpected kind");
        };
        assert_eq!(comparison_items.len(), 2);
        assert_eq!(comparison_items[0].name, "Eclipse");
        assert_eq!(comparison_items[0].value, "20");
        assert_eq!(comparison_items[1].value, "33");
        assert_eq!(comparison_items[1].unit, "knots");
    }

    #[test]
    fn neighbouring_pairs_overlap() {
        let yachts = vec![
            with_speed("A", "25 kn"),
            with_speed("B", "unknown"),
            with_speed("C", "18.5 kn"),
            with_speed("D", "30 kn"),
        ];
        let answers = generate(&yachts, 1)
            .iter()
            .map(|q| q.correct_answer())
            .collect::<Vec<_>>();
        assert_eq!(
            answers,
            vec![Answer::Choice("A".into()), Answer::Choice("D".into())]
        );
    }

    #[test]
    fn ties_are_skipped() {
        let yachts = vec![
            with_speed("A", "20 kn"),
            with_speed("B", "20"),
            with_speed("C", "21"),
        ];
        let questions = generate(&yachts, 7);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "7");
        assert_eq!(questions[0].correct_answer(), Answer::Choice("C".into()));
    }
}
