//! Canned assistant replies
//!
//! The notebook has no language model behind it. Replies are fixed
//! templates: an acknowledgement that echoes the chat message, a "summary"
//! that keeps the leading sentences of the pasted text, and an "answer" that
//! repeats the question.

/// Urdu full stop, the sentence delimiter for summaries
pub const URDU_FULL_STOP: char = '۔';

/// Prefix of user messages carrying text for analysis
pub const ANALYSIS_MARKER: &str = "📝 **متن تجزیے کے لیے:**";

/// Prefix of user messages carrying a question about the text
pub const QUESTION_MARKER: &str = "❓ **سوال:**";

/// Prefix of summary replies
pub const SUMMARY_MARKER: &str = "📄 **خلاصہ:**";

/// Prefix of answer replies
pub const ANSWER_MARKER: &str = "🤖 **جواب:**";

fn leading_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

/// Acknowledge a chat message, echoing its first `echo_chars` characters
pub fn chat_reply(input: &str, echo_chars: usize) -> String {
    format!(
        "🤖 آپ کے پیغام کا شکریہ! آپ نے کہا: '{}...'",
        leading_chars(input, echo_chars)
    )
}

/// User message recording the text sent for analysis
pub fn analysis_prompt(text: &str, preview_chars: usize) -> String {
    format!("{}\n\n{}...", ANALYSIS_MARKER, leading_chars(text, preview_chars))
}

/// User message recording a question about the text
pub fn question_prompt(question: &str) -> String {
    format!("{} {}", QUESTION_MARKER, question)
}

/// Keep the first `max_sentences` sentences of `text`.
///
/// Sentences are split on the Urdu full stop; blank pieces are ignored. When
/// the text has no more than `max_sentences` sentences it is returned as is.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences: Vec<&str> = text
        .split(URDU_FULL_STOP)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let body = if sentences.len() > max_sentences {
        let mut joined = sentences[..max_sentences].join(&URDU_FULL_STOP.to_string());
        joined.push(URDU_FULL_STOP);
        joined
    } else {
        text.to_string()
    };

    format!("{} {}", SUMMARY_MARKER, body)
}

/// Templated answer to a question about `_text`
pub fn answer(_text: &str, question: &str) -> String {
    format!(
        "{} آپ کے سوال '{}' کے بارے میں - یہ متن کی بنیاد پر جواب ہے۔ اصل متن میں موجود معلومات کے مطابق جواب فراہم کیا گیا ہے۔",
        ANSWER_MARKER, question
    )
}
