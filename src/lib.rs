pub mod config;
pub mod error;
pub mod quiz;
pub mod render;
pub mod yachts;

pub use quiz::{generate_questions, Answer, Question, QuestionKind};
pub use yachts::YachtRecord;
