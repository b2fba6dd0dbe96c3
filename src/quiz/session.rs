use std::time::{SystemTime, UNIX_EPOCH};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::sampler::shuffled;
use crate::quiz::{Answer, Question};

pub const DEFAULT_QUIZ_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizMode {
    Standard,
    // Loops over the whole batch, feedback after every answer
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    pub mode: QuizMode,
    pub questions: Vec<Question>,
    pub current_question: usize,
    // Standard mode only, one slot per question
    pub answers: Vec<Option<Answer>>,
    pub score: u32,
    pub total_answered: u32,
    pub correct_streak: u32,
    // Unix seconds; dialogues stored before this field existed read as 0
    #[serde(default)]
    pub started_at: u64,
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

// Badge shown next to the final percentage
pub fn rating(percentage: u32) -> &'static str {
    match percentage {
        90.. => "Excellent!",
        80..=89 => "Great!",
        70..=79 => "Good!",
        60..=69 => "Fair",
        _ => "Keep Learning!",
    }
}

pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

impl Quiz {
    pub fn new<R: Rng + ?Sized>(all: &[Question], mode: QuizMode, length: usize, rng: &mut R) -> Self {
        let mut questions = shuffled(all, rng);
        if mode == QuizMode::Standard {
            questions.truncate(length);
        }
        let answers = match mode {
            QuizMode::Standard => vec![None; questions.len()],
            QuizMode::Infinite => Vec::new(),
        };
        Self {
            mode,
            questions,
            current_question: 0,
            answers,
            score: 0,
            total_answered: 0,
            correct_streak: 0,
            started_at: unix_now(),
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// Records an answer to the current question.
    ///
    /// Standard quizzes only store it and return `None`. Infinite quizzes
    /// score it right away and return the feedback to show.
    pub fn submit(&mut self, answer: Answer) -> Option<Feedback> {
        let question = self.questions.get(self.current_question)?;
        match self.mode {
            QuizMode::Standard => {
                if let Some(slot) = self.answers.get_mut(self.current_question) {
                    *slot = Some(answer);
                }
                None
            }
            QuizMode::Infinite => {
                let correct = question.is_correct(&answer);
                let explanation = if correct {
                    question.explanation.clone()
                } else {
                    Some(question.reveal())
                };
                self.total_answered += 1;
                if correct {
                    self.score += 1;
                    self.correct_streak += 1;
                } else {
                    self.correct_streak = 0;
                }
                Some(Feedback {
                    correct,
                    explanation,
                })
            }
        }
    }

    // Infinite quizzes wrap around, reshuffled
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        match self.mode {
            QuizMode::Standard => {
                if self.current_question + 1 < self.questions.len() {
                    self.current_question += 1;
                    true
                } else {
                    false
                }
            }
            QuizMode::Infinite => {
                self.current_question = (self.current_question + 1) % self.questions.len();
                if self.current_question == 0 {
                    self.questions.shuffle(rng);
                }
                true
            }
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.mode == QuizMode::Standard && self.current_question > 0 {
            self.current_question -= 1;
            true
        } else {
            false
        }
    }

    // Rounded half up. Infinite quizzes only count what was answered
    pub fn accuracy(&self) -> u32 {
        let total = match self.mode {
            QuizMode::Standard => self.questions.len() as u64,
            QuizMode::Infinite => self.total_answered as u64,
        };
        if total == 0 {
            return 0;
        }
        ((self.score as u64 * 200 + total) / (total * 2)) as u32
    }

    pub fn elapsed_secs(&self, now: u64) -> u64 {
        // Unknown start, e.g. a dialogue stored by an older version
        if self.started_at == 0 {
            return 0;
        }
        now.saturating_sub(self.started_at)
    }

    /// Scores a standard quiz from the recorded answers.
    pub fn finish(&mut self) -> u32 {
        if self.mode == QuizMode::Standard {
            self.score = self
                .questions
                .iter()
                .zip(&self.answers)
                .filter(|(question, answer)| matches!(answer, Some(a) if question.is_correct(a)))
                .count() as u32;
        }
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::{fleet, rng};
    use crate::quiz::generate_questions;

    fn batch() -> Vec<Question> {
        generate_questions(fleet(), &mut rng())
    }

    #[test]
    fn standard_quiz_is_capped() {
        let all = batch();
        assert!(all.len() > DEFAULT_QUIZ_LENGTH);
        let quiz = Quiz::new(&all, QuizMode::Standard, DEFAULT_QUIZ_LENGTH, &mut rng());
        assert_eq!(quiz.questions.len(), DEFAULT_QUIZ_LENGTH);
        assert_eq!(quiz.answers.len(), DEFAULT_QUIZ_LENGTH);
        assert!(quiz.questions.iter().all(|q| all.contains(q)));
    }

    #[test]
    fn standard_quiz_scores_at_the_end() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Standard, 5, &mut rng());
        let mut expected = 0;
        let mut index = 0;
        loop {
            let question = quiz.current().unwrap().clone();
            let answer = if index % 2 == 0 {
                expected += 1;
                question.correct_answer()
            } else {
                Answer::Choice("nonsense".to_string())
            };
            assert_eq!(quiz.submit(answer), None);
            index += 1;
            if !quiz.advance(&mut rng()) {
                break;
            }
        }
        assert_eq!(index, 5);
        assert_eq!(quiz.finish(), expected);
    }

    #[test]
    fn unanswered_questions_score_nothing() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Standard, 3, &mut rng());
        assert_eq!(quiz.finish(), 0);
    }

    #[test]
    fn previous_only_goes_back_in_standard_mode() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Standard, 3, &mut rng());
        assert!(!quiz.previous());
        quiz.advance(&mut rng());
        assert!(quiz.previous());
        assert_eq!(quiz.current_question, 0);

        let mut infinite = Quiz::new(&all, QuizMode::Infinite, 3, &mut rng());
        infinite.advance(&mut rng());
        assert!(!infinite.previous());
    }

    #[test]
    fn infinite_quiz_gives_feedback_and_tracks_streaks() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Infinite, DEFAULT_QUIZ_LENGTH, &mut rng());
        assert_eq!(quiz.questions.len(), all.len());

        let right = quiz.current().unwrap().correct_answer();
        let feedback = quiz.submit(right).unwrap();
        assert!(feedback.correct);
        quiz.advance(&mut rng());

        let right = quiz.current().unwrap().correct_answer();
        quiz.submit(right).unwrap();
        assert_eq!(quiz.correct_streak, 2);
        quiz.advance(&mut rng());

        let reveal = quiz.current().unwrap().reveal();
        let feedback = quiz.submit(Answer::Positions(vec![99])).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.explanation, Some(reveal));
        assert_eq!(quiz.score, 2);
        assert_eq!(quiz.total_answered, 3);
        assert_eq!(quiz.correct_streak, 0);
    }

    #[test]
    fn infinite_quiz_wraps_around_with_the_same_questions() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Infinite, 0, &mut rng());
        let mut rng = rng();
        for _ in 0..all.len() - 1 {
            assert!(quiz.advance(&mut rng));
        }
        assert!(quiz.advance(&mut rng));
        assert_eq!(quiz.current_question, 0);
        assert_eq!(quiz.questions.len(), all.len());
        assert!(all.iter().all(|q| quiz.questions.contains(q)));
    }

    #[test]
    fn ratings_follow_the_percentage_bands() {
        let cases = [
            (100, "Excellent!"),
            (90, "Excellent!"),
            (89, "Great!"),
            (80, "Great!"),
            (79, "Good!"),
            (70, "Good!"),
            (69, "Fair"),
            (60, "Fair"),
            (59, "Keep Learning!"),
            (0, "Keep Learning!"),
        ];
        for (percentage, expected) in cases {
            assert_eq!(rating(percentage), expected, "{}%", percentage);
        }
    }

    #[test]
    fn standard_accuracy_counts_every_question() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Standard, 3, &mut rng());
        let right = quiz.current().unwrap().correct_answer();
        quiz.submit(right);
        quiz.finish();
        // 1 of 3 is 33.3%
        assert_eq!(quiz.accuracy(), 33);

        quiz.advance(&mut rng());
        let right = quiz.current().unwrap().correct_answer();
        quiz.submit(right);
        quiz.finish();
        // 2 of 3 is 66.7%
        assert_eq!(quiz.accuracy(), 67);
    }

    #[test]
    fn infinite_accuracy_counts_answered_questions() {
        let all = batch();
        let mut quiz = Quiz::new(&all, QuizMode::Infinite, 0, &mut rng());
        assert_eq!(quiz.accuracy(), 0);

        let right = quiz.current().unwrap().correct_answer();
        quiz.submit(right);
        quiz.advance(&mut rng());
        quiz.submit(Answer::Positions(vec![99]));
        assert_eq!(quiz.accuracy(), 50);
        assert_eq!(rating(quiz.accuracy()), "Keep Learning!");
    }

    #[test]
    fn elapsed_time_is_measured_from_the_start() {
        let mut quiz = Quiz::new(&batch(), QuizMode::Standard, 3, &mut rng());
        assert!(quiz.started_at > 0);

        quiz.started_at = 1_000;
        assert_eq!(quiz.elapsed_secs(1_125), 125);
        assert_eq!(format_elapsed(quiz.elapsed_secs(1_125)), "2:05");
        // Clock went backwards
        assert_eq!(quiz.elapsed_secs(900), 0);

        quiz.started_at = 0;
        assert_eq!(quiz.elapsed_secs(1_125), 0);
    }

    #[test]
    fn dialogues_stored_without_a_start_time_still_load() {
        let quiz = Quiz::new(&batch(), QuizMode::Infinite, 0, &mut rng());
        let mut json = serde_json::to_value(&quiz).unwrap();
        json.as_object_mut().unwrap().remove("started_at");
        let restored: Quiz = serde_json::from_value(json).unwrap();
        assert_eq!(restored.started_at, 0);
        assert_eq!(restored.questions, quiz.questions);
    }

    #[test]
    fn empty_batch_has_nothing_to_ask() {
        let mut quiz = Quiz::new(&[], QuizMode::Infinite, 20, &mut rng());
        assert!(quiz.current().is_none());
        assert_eq!(quiz.submit(Answer::Choice("True".into())), None);
        assert!(!quiz.advance(&mut rng()));
    }
}
