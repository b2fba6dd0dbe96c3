//! Turning questions into Telegram messages and replies back into answers.

use teloxide::utils::html::escape;

use crate::quiz::{Answer, Question, QuestionKind, Verdict, BLANK};

/// HTML text of a question, numbered from 1.
pub fn question_text(question: &Question, number: usize) -> String {
    let mut text = format!("Question №{}:\n<b>{}</b>", number, escape(&question.question));
    match &question.kind {
        QuestionKind::MultipleChoice { .. }
        | QuestionKind::ImageIdentification { .. }
        | QuestionKind::TrueFalse { .. } => {}
        QuestionKind::Comparison {
            comparison_items, ..
        } => {
            let items = comparison_items
                .iter()
                .map(|item| escape(&item.name))
                .collect::<Vec<_>>()
                .join(" or ");
            text.push_str(&format!("\n\n{}", items));
        }
        QuestionKind::Matching { matching_pairs, .. } => {
            text.push_str("\n\n");
            for (i, pair) in matching_pairs.iter().enumerate() {
                text.push_str(&format!("{}. {}\n", i + 1, escape(&pair.left)));
            }
            text.push('\n');
            for (i, owner) in matching_options(question).iter().enumerate() {
                text.push_str(&format!("{}) {}\n", i + 1, escape(owner)));
            }
            text.push_str("\nReply with the option number for each yacht, e.g. <code>2 4 1 3</code>");
        }
        QuestionKind::Ordering { order_items, .. } => {
            text.push_str("\n\n");
            for (i, item) in order_items.iter().enumerate() {
                text.push_str(&format!("{}. {}\n", i + 1, escape(item)));
            }
            text.push_str("\nReply with the item numbers, smallest first, e.g. <code>3 1 4 2</code>");
        }
        QuestionKind::Cloze {
            cloze_text,
            cloze_options,
            ..
        } => {
            let mut numbered = escape(cloze_text);
            for blank in 1..=cloze_options.len() {
                numbered = numbered.replacen(&escape(BLANK), &format!("<b>[{}]</b>", blank), 1);
            }
            text.push_str(&format!("\n\n<i>{}</i>\n\n", numbered));
            for (blank, options) in cloze_options.iter().enumerate() {
                let listed = options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("{}) {}", i + 1, escape(option)))
                    .collect::<Vec<_>>()
                    .join("   ");
                text.push_str(&format!("[{}] {}\n", blank + 1, listed));
            }
            text.push_str("\nReply with one option number per blank, e.g. <code>1 3 2</code>");
        }
        QuestionKind::FindError { error_text, .. } => {
            text.push_str(&format!("\n\n<i>{}</i>", escape(error_text)));
        }
    }
    text
}

/// Buttons for questions answered with a single value, one per row.
/// Questions answered with a list get none.
pub fn reply_keyboard(question: &Question) -> Option<Vec<String>> {
    match &question.kind {
        QuestionKind::MultipleChoice { options, .. }
        | QuestionKind::ImageIdentification { options, .. } => Some(options.clone()),
        QuestionKind::TrueFalse { .. } => Some(vec![
            Verdict::True.as_str().to_string(),
            Verdict::False.as_str().to_string(),
        ]),
        QuestionKind::Comparison {
            comparison_items, ..
        } => Some(comparison_items.iter().map(|item| item.name.clone()).collect()),
        QuestionKind::FindError { error_options, .. } => Some(error_options.clone()),
        QuestionKind::Matching { .. } | QuestionKind::Ordering { .. } | QuestionKind::Cloze { .. } => {
            None
        }
    }
}

/// Reads a chat reply as an answer to `question`. Lists are 1-based numbers
/// separated by spaces or commas; anything malformed gives `None`.
pub fn parse_reply(question: &Question, reply: &str) -> Option<Answer> {
    let reply = reply.trim();
    if reply.is_empty() {
        return None;
    }
    match &question.kind {
        QuestionKind::MultipleChoice { .. }
        | QuestionKind::ImageIdentification { .. }
        | QuestionKind::TrueFalse { .. }
        | QuestionKind::Comparison { .. }
        | QuestionKind::FindError { .. } => Some(Answer::Choice(reply.to_string())),
        QuestionKind::Matching { matching_pairs, .. } => {
            let options = matching_options(question);
            let picks = numbers(reply, matching_pairs.len(), options.len())?;
            Some(Answer::Choices(
                picks.into_iter().map(|i| options[i].clone()).collect(),
            ))
        }
        QuestionKind::Ordering { order_items, .. } => {
            numbers(reply, order_items.len(), order_items.len()).map(Answer::Positions)
        }
        QuestionKind::Cloze { cloze_options, .. } => {
            let picks = numbers(reply, cloze_options.len(), usize::MAX)?;
            let filled = picks
                .into_iter()
                .zip(cloze_options)
                .map(|(i, options)| options.get(i).cloned())
                .collect::<Option<Vec<_>>>()?;
            Some(Answer::Choices(filled))
        }
    }
}

/// Right-hand values of a matching question as they are listed, alphabetically.
fn matching_options(question: &Question) -> Vec<String> {
    let QuestionKind::Matching { matching_pairs, .. } = &question.kind else {
        return Vec::new();
    };
    let mut options = matching_pairs
        .iter()
        .map(|pair| pair.right.clone())
        .collect::<Vec<_>>();
    options.sort();
    options
}

/// Exactly `count` numbers in `1..=max`, as 0-based indices.
fn numbers(reply: &str, count: usize, max: usize) -> Option<Vec<usize>> {
    let picks = reply
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().ok().filter(|n| (1..=max).contains(n)))
        .map(|n| n.map(|n| n - 1))
        .collect::<Option<Vec<_>>>()?;
    if picks.len() != count {
        return None;
    }
    Some(picks)
}
