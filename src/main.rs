use std::sync::Arc;

use dotenv::dotenv;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatAction, InputFile, KeyboardButton, KeyboardMarkup, ParseMode},
};
use yacht_quiz::config::Config;
use yacht_quiz::quiz::session::{format_elapsed, rating, unix_now};
use yacht_quiz::quiz::{self, Quiz, QuizMode};
use yacht_quiz::render;
use yacht_quiz::yachts::csv_loader;
use yacht_quiz::{Question, QuestionKind};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveModeChoice,
    StandardQuiz {
        quiz: Quiz,
        awaiting_answer: bool,
    },
    InfiniteQuiz {
        quiz: Quiz,
        awaiting_answer: bool,
    },
}

type UserInfoStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    // .env is optional, the environment may already be set
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting yacht quiz bot...");

    let config = Config::from_env().expect("Invalid configuration");

    let records = match csv_loader::load_yachts(&config.yachts_csv) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "Could not load {}: {}. Using the built-in yachts",
                config.yachts_csv.display(),
                err
            );
            csv_loader::fallback_yachts()
        }
    };

    // Generated once; quizzes reshuffle this batch, they never regenerate it
    let questions = Arc::new(match config.seed {
        Some(seed) => quiz::generate_questions(records, &mut StdRng::seed_from_u64(seed)),
        None => quiz::generate_questions(records, &mut thread_rng()),
    });
    if questions.is_empty() {
        warn!("No questions could be generated, every quiz will be empty");
    }

    let bot = Bot::from_env();

    info!("Opening the dialogue database at {}", config.database);
    let storage: UserInfoStorage = SqliteStorage::open(&config.database, Json)
        .await
        .expect("Failed to open the dialogue database")
        .erase();

    let quiz_length = config.quiz_length;

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveModeChoice].endpoint(
                move |bot: Bot, dialogue: QuizDialogue, msg: Message| {
                    receive_mode_choice(questions.clone(), quiz_length, bot, dialogue, msg)
                },
            ))
            .branch(
                dptree::case![State::StandardQuiz {
                    quiz,
                    awaiting_answer
                }]
                .endpoint(standard_quiz),
            )
            .branch(
                dptree::case![State::InfiniteQuiz {
                    quiz,
                    awaiting_answer
                }]
                .endpoint(infinite_quiz),
            ),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Hi! I'm the superyacht quiz bot. How well do you know the biggest yachts afloat?";
const STANDARD_QUIZ: &str = "Standard quiz";
const INFINITE_QUIZ: &str = "Infinite mode";
const GO: &str = "Go!";
const BACK: &str = "Back";
const STOP: &str = "Stop";

fn mode_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(STANDARD_QUIZ),
        KeyboardButton::new(INFINITE_QUIZ),
    ]])
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;
    bot.send_message(msg.chat.id, "Which quiz would you like to play?")
        .reply_markup(mode_keyboard())
        .await?;

    dialogue.update(State::ReceiveModeChoice).await?;
    Ok(())
}

async fn receive_mode_choice(
    questions: Arc<Vec<Question>>,
    quiz_length: usize,
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
) -> HandlerResult {
    let mode = match msg.text() {
        Some(STANDARD_QUIZ) => QuizMode::Standard,
        Some(INFINITE_QUIZ) => QuizMode::Infinite,
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .reply_markup(mode_keyboard())
                .await?;
            return Ok(());
        }
    };

    if questions.is_empty() {
        bot.send_message(msg.chat.id, "Sorry, there are no questions to ask right now.")
            .await?;
        return Ok(());
    }

    let quiz = Quiz::new(&questions, mode, quiz_length, &mut thread_rng());
    debug!("Chat {:?} starts a {:?} quiz", msg.chat.id, mode);

    let intro = match mode {
        QuizMode::Standard => format!(
            "Great! {} questions, your score comes at the end.",
            quiz.questions.len()
        ),
        QuizMode::Infinite => format!(
            "Great! Answer as long as you like, press \"{}\" to finish.",
            STOP
        ),
    };
    bot.send_message(msg.chat.id, intro)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(GO)]]))
        .await?;

    let state = match mode {
        QuizMode::Standard => State::StandardQuiz {
            quiz,
            awaiting_answer: false,
        },
        QuizMode::Infinite => State::InfiniteQuiz {
            quiz,
            awaiting_answer: false,
        },
    };
    dialogue.update(state).await?;
    Ok(())
}

async fn standard_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    (mut quiz, awaiting_answer): (Quiz, bool),
    msg: Message,
) -> HandlerResult {
    if awaiting_answer {
        if msg.text() == Some(BACK) {
            if !quiz.previous() {
                bot.send_message(msg.chat.id, "This is the first question").await?;
            }
        } else {
            let Some(answer) = quiz
                .current()
                .zip(msg.text())
                .and_then(|(question, text)| render::parse_reply(question, text))
            else {
                bot.send_message(msg.chat.id, "Please answer the way the question asks")
                    .await?;
                return Ok(());
            };
            quiz.submit(answer);

            if !quiz.advance(&mut thread_rng()) {
                let score = quiz.finish();
                let accuracy = quiz.accuracy();
                let summary = format!(
                    "The quiz is over! {}\nYou answered {} of {} questions correctly ({}%) in {}.\nWhat would you like to do next?",
                    rating(accuracy),
                    score,
                    quiz.questions.len(),
                    accuracy,
                    format_elapsed(quiz.elapsed_secs(unix_now()))
                );
                bot.send_message(msg.chat.id, summary)
                    .reply_markup(mode_keyboard())
                    .await?;

                dialogue.update(State::ReceiveModeChoice).await?;
                return Ok(());
            }
        }
    }

    if quiz.current().is_none() {
        return nothing_to_ask(&bot, &dialogue, msg.chat.id).await;
    }
    send_question(&bot, msg.chat.id, &quiz).await?;

    dialogue
        .update(State::StandardQuiz {
            quiz,
            awaiting_answer: true,
        })
        .await?;
    Ok(())
}

async fn infinite_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    (mut quiz, awaiting_answer): (Quiz, bool),
    msg: Message,
) -> HandlerResult {
    if msg.text() == Some(STOP) {
        let summary = format!(
            "Well sailed! {} of {} answers were correct, {}% accuracy in {}.\nWhat would you like to do next?",
            quiz.score,
            quiz.total_answered,
            quiz.accuracy(),
            format_elapsed(quiz.elapsed_secs(unix_now()))
        );
        bot.send_message(msg.chat.id, summary)
            .reply_markup(mode_keyboard())
            .await?;

        dialogue.update(State::ReceiveModeChoice).await?;
        return Ok(());
    }

    if awaiting_answer {
        let Some(answer) = quiz
            .current()
            .zip(msg.text())
            .and_then(|(question, text)| render::parse_reply(question, text))
        else {
            bot.send_message(msg.chat.id, "Please answer the way the question asks")
                .await?;
            return Ok(());
        };

        if let Some(feedback) = quiz.submit(answer) {
            let verdict = if feedback.correct {
                format!("Correct! Streak: {}", quiz.correct_streak)
            } else {
                "Wrong!".to_string()
            };
            let text = match feedback.explanation {
                Some(explanation) => format!("{}\n\n{}", verdict, explanation),
                None => verdict,
            };
            bot.send_message(msg.chat.id, text).await?;
        }
        quiz.advance(&mut thread_rng());
    }

    if quiz.current().is_none() {
        return nothing_to_ask(&bot, &dialogue, msg.chat.id).await;
    }
    send_question(&bot, msg.chat.id, &quiz).await?;

    dialogue
        .update(State::InfiniteQuiz {
            quiz,
            awaiting_answer: true,
        })
        .await?;
    Ok(())
}

async fn nothing_to_ask(bot: &Bot, dialogue: &QuizDialogue, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, "Sorry, there are no questions to ask right now.")
        .reply_markup(mode_keyboard())
        .await?;
    dialogue.update(State::ReceiveModeChoice).await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, quiz: &Quiz) -> HandlerResult {
    let Some(question) = quiz.current() else {
        return Ok(());
    };
    let number = match quiz.mode {
        QuizMode::Standard => quiz.current_question + 1,
        QuizMode::Infinite => quiz.total_answered as usize + 1,
    };
    let text = render::question_text(question, number);
    let markup = reply_markup(question, quiz.mode);

    if let QuestionKind::ImageIdentification { image, .. } = &question.kind {
        match url::Url::parse(image) {
            Ok(url) => {
                // Nice to have, not worth failing the question over
                let _ = bot.send_chat_action(chat_id, ChatAction::UploadPhoto).await;
                bot.send_photo(chat_id, InputFile::url(url))
                    .caption(text)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(markup)
                    .await?;
                return Ok(());
            }
            Err(err) => warn!("Question {} has a bad image URL {:?}: {}", question.id, image, err),
        }
    }

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup)
        .await?;
    Ok(())
}

fn reply_markup(question: &Question, mode: QuizMode) -> KeyboardMarkup {
    let mut rows = render::reply_keyboard(question)
        .unwrap_or_default()
        .into_iter()
        .map(|option| vec![KeyboardButton::new(option)])
        .collect::<Vec<_>>();
    // Composite answers are typed, only the navigation button is offered
    match mode {
        QuizMode::Standard => rows.push(vec![KeyboardButton::new(BACK)]),
        QuizMode::Infinite => rows.push(vec![KeyboardButton::new(STOP)]),
    }
    KeyboardMarkup::new(rows)
}
