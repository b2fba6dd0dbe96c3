pub mod assembly;
pub mod builder;
pub mod cloze;
pub mod comparison;
pub mod find_error;
pub mod image;
pub mod matching;
pub mod ordering;
pub mod sampler;
pub mod session;
pub mod true_false;

pub use assembly::{generate_questions, QuestionType, GENERATION_ORDER};
pub use session::{Feedback, Quiz, QuizMode};

pub const BLANK: &str = "[BLANK]";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    // "1", "2", ... unique within a batch
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    Matching {
        matching_pairs: Vec<MatchingPair>,
        correct_answer: Vec<String>,
    },
    TrueFalse {
        correct_answer: Verdict,
    },
    ImageIdentification {
        image: String,
        options: Vec<String>,
        correct_answer: String,
    },
    /// `correct_answer[k]` is the position in `order_items` of the k-th smallest item.
    Ordering {
        order_items: Vec<String>,
        correct_answer: Vec<usize>,
    },
    Comparison {
        comparison_items: Vec<ComparisonItem>,
        correct_answer: String,
    },
    Cloze {
        cloze_text: String,
        cloze_options: Vec<Vec<String>>,
        correct_answer: Vec<String>,
    },
    FindError {
        error_text: String,
        error_options: Vec<String>,
        correct_answer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchingPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonItem {
    pub name: String,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verdict {
    True,
    False,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
        }
    }
}

impl From<bool> for Verdict {
    fn from(holds: bool) -> Self {
        if holds {
            Verdict::True
        } else {
            Verdict::False
        }
    }
}

/// A submitted (or correct) answer.
///
/// Equality is the answer oracle: scalar answers compare by exact value,
/// sequences compare element-wise and in order. Matching and cloze answers are
/// `Choices`, ordering answers are `Positions`, everything else is a `Choice`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(String),
    Choices(Vec<String>),
    Positions(Vec<usize>),
}

impl Question {
    pub fn new(id: usize, question: String, explanation: Option<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            question,
            explanation,
            kind,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match &self.kind {
            QuestionKind::MultipleChoice { .. } => QuestionType::Builder,
            QuestionKind::Matching { .. } => QuestionType::Matching,
            QuestionKind::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionKind::ImageIdentification { .. } => QuestionType::Image,
            QuestionKind::Ordering { .. } => QuestionType::Ordering,
            QuestionKind::Comparison { .. } => QuestionType::Comparison,
            QuestionKind::Cloze { .. } => QuestionType::Cloze,
            QuestionKind::FindError { .. } => QuestionType::FindError,
        }
    }

    pub fn correct_answer(&self) -> Answer {
        match &self.kind {
            QuestionKind::MultipleChoice { correct_answer, .. }
            | QuestionKind::ImageIdentification { correct_answer, .. }
            | QuestionKind::Comparison { correct_answer, .. }
            | QuestionKind::FindError { correct_answer, .. } => {
                Answer::Choice(correct_answer.clone())
            }
            QuestionKind::TrueFalse { correct_answer } => {
                Answer::Choice(correct_answer.as_str().to_string())
            }
            QuestionKind::Matching { correct_answer, .. }
            | QuestionKind::Cloze { correct_answer, .. } => Answer::Choices(correct_answer.clone()),
            QuestionKind::Ordering { correct_answer, .. } => {
                Answer::Positions(correct_answer.clone())
            }
        }
    }

    pub fn is_correct(&self, answer: &Answer) -> bool {
        self.correct_answer() == *answer
    }

    /// Text shown after a wrong answer: the correct answer spelled out,
    /// followed by the explanation if there is one.
    pub fn reveal(&self) -> String {
        let correct = match &self.kind {
            QuestionKind::Ordering {
                order_items,
                correct_answer,
            } => {
                let order = correct_answer
                    .iter()
                    .filter_map(|i| order_items.get(*i))
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" → ");
                format!("The correct order was: {}.", order)
            }
            QuestionKind::Cloze {
                cloze_text,
                correct_answer,
                ..
            } => {
                let filled = correct_answer
                    .iter()
                    .fold(cloze_text.clone(), |text, word| text.replacen(BLANK, word, 1));
                format!("Correct answer: {}", filled)
            }
            QuestionKind::Matching { matching_pairs, .. } => {
                let pairs = matching_pairs
                    .iter()
                    .map(|pair| format!("{} → {}", pair.left, pair.right))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("The correct matches were: {}.", pairs)
            }
            _ => match self.correct_answer() {
                Answer::Choice(choice) => format!("Correct answer: {}.", choice),
                // Only the composite kinds above have sequence answers
                _ => String::new(),
            },
        };
        match &self.explanation {
            Some(explanation) => format!("{} {}", correct, explanation),
            None => correct,
        }
    }
}

pub(crate) fn length_label(name: &str, metres: f64) -> String {
    format!("{} ({}m)", name, metres)
}
