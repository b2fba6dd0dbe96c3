use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use yacht_quiz::quiz::{generate_questions, Quiz, QuizMode, BLANK};
use yacht_quiz::yachts::csv_loader::{fallback_yachts, read_yachts};
use yacht_quiz::{Answer, Question, QuestionKind};

const TABLE: &str = "\
Top superyachts,,,,,,,,,
,name,builder,owner,year_delivered,length,top_speed,profile_picture,rank
1,Azzam,Lürssen,Mohammed bin Zayed,2013,180.61m,33 kn,https://example.com/azzam.jpg,1
2,Eclipse,Blohm+Voss,Roman Abramovich,2010,162.5m,25 kn,https://example.com/eclipse.jpg,2
3,Dilbar,Lürssen,Alisher Usmanov,2016,156m,22.5 kn,,3
4,\"Al Said\",Lürssen,Sultan of Oman,2008,155m,22 kn,https://example.com/alsaid.jpg,4
5,Flying Fox,Lürssen,Dmitry Kamenshchik,2019,136m,20 kn,,5
6,Koru,Oceanco,Jeff Bezos,2023,127m,18 kn,https://example.com/koru.jpg,6
7,Symphony,Feadship,Bernard Arnault,2015,101.5m,19 kn,,7
8,Sailing Yacht A,Nobiskrug,Andrey Melnichenko,2017,142.8m,21 kn,,8
9,Octopus,Lürssen,,2003,126.2m,20 kn,,9
10,Nameless hull,,,,,,,10
11,Rising Sun,Lürssen,David Geffen,2004,138m,28 kn,https://example.com/risingsun.jpg,11
";

fn batch(seed: u64) -> Vec<Question> {
    let records = read_yachts(TABLE.as_bytes()).unwrap();
    generate_questions(records, &mut StdRng::seed_from_u64(seed))
}

fn all_distinct(values: &[String]) -> bool {
    values.iter().collect::<HashSet<_>>().len() == values.len()
}

/// The correct answer only uses what the question itself offers.
fn assert_answerable(question: &Question) {
    match &question.kind {
        QuestionKind::MultipleChoice {
            options,
            correct_answer,
        }
        | QuestionKind::ImageIdentification {
            options,
            correct_answer,
            ..
        } => {
            assert_eq!(options.len(), 4, "{:?}", question);
            assert!(all_distinct(options), "{:?}", question);
            assert_eq!(options.iter().filter(|o| *o == correct_answer).count(), 1);
        }
        QuestionKind::Matching {
            matching_pairs,
            correct_answer,
        } => {
            assert_eq!(matching_pairs.len(), 4);
            let rights = matching_pairs.iter().map(|p| p.right.clone()).collect::<Vec<_>>();
            assert_eq!(*correct_answer, rights);
        }
        QuestionKind::TrueFalse { correct_answer } => {
            let text = Answer::Choice(correct_answer.as_str().to_string());
            assert!(text == Answer::Choice("True".into()) || text == Answer::Choice("False".into()));
        }
        QuestionKind::Ordering {
            order_items,
            correct_answer,
        } => {
            assert_eq!(order_items.len(), 4);
            let mut positions = correct_answer.clone();
            positions.sort();
            assert_eq!(positions, vec![0, 1, 2, 3]);
        }
        QuestionKind::Comparison {
            comparison_items,
            correct_answer,
        } => {
            assert_eq!(comparison_items.len(), 2);
            assert!(comparison_items.iter().any(|item| item.name == *correct_answer));
        }
        QuestionKind::Cloze {
            cloze_text,
            cloze_options,
            correct_answer,
        } => {
            assert_eq!(cloze_text.matches(BLANK).count(), cloze_options.len());
            assert_eq!(cloze_options.len(), correct_answer.len());
            for (options, correct) in cloze_options.iter().zip(correct_answer) {
                assert_eq!(options.len(), 3);
                assert!(all_distinct(options));
                assert!(options.contains(correct));
            }
        }
        QuestionKind::FindError {
            error_options,
            correct_answer,
            ..
        } => {
            assert!(error_options.contains(correct_answer));
        }
    }
}

#[test]
fn every_question_is_answerable() {
    for seed in 0..20 {
        let questions = batch(seed);
        assert!(!questions.is_empty());
        for question in &questions {
            assert_answerable(question);
            assert!(question.is_correct(&question.correct_answer()));
        }
    }
}

#[test]
fn ids_are_unique_and_increasing() {
    let questions = batch(3);
    let ids = questions
        .iter()
        .map(|q| q.id.parse::<usize>().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids, (1..=questions.len()).collect::<Vec<_>>());
}

#[test]
fn unnamed_and_incomplete_rows_never_show_up() {
    for question in batch(5) {
        let json = serde_json::to_string(&question).unwrap();
        assert!(!json.contains("Nameless hull"));
    }
}

#[test]
fn same_seed_same_batch() {
    assert_eq!(batch(11), batch(11));
}

#[test]
fn fallback_yachts_still_make_a_quiz() {
    let questions = generate_questions(fallback_yachts(), &mut StdRng::seed_from_u64(1));
    assert!(questions.len() >= 20);

    let mut rng = StdRng::seed_from_u64(2);
    let mut quiz = Quiz::new(&questions, QuizMode::Standard, 20, &mut rng);
    while let Some(question) = quiz.current() {
        let answer = question.correct_answer();
        quiz.submit(answer);
        if !quiz.advance(&mut rng) {
            break;
        }
    }
    assert_eq!(quiz.finish(), 20);
}

#[test]
fn absurd_years_do_not_stop_generation() {
    let table = TABLE.replace(",2013,", ",2147483647,").replace(",2003,", ",-2147483647,");
    let records = read_yachts(table.as_bytes()).unwrap();
    for seed in 0..20 {
        let questions = generate_questions(records.clone(), &mut StdRng::seed_from_u64(seed));
        assert!(!questions.is_empty());
        for question in &questions {
            assert_answerable(question);
        }
    }
}
