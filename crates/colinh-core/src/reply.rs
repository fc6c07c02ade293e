//! Reply rules — keyword matching and the fixed teacher templates.
//!
//! Pure functions, no I/O. Matching is a plain substring test against the
//! lowercased, trimmed utterance; the reply quotes the utterance exactly as the
//! learner gave it.

/// Sent back when the learner submits nothing (or only whitespace).
pub const EMPTY_INPUT_PROMPT: &str = "Xin chào! Hãy nói một câu tiếng Việt để bắt đầu học nhé! 🌸";

/// Sent back when producing a reply fails on the server.
pub const APOLOGY_REPLY: &str = "Xin lỗi, cô gặp chút vấn đề. Hãy thử lại sau nhé! 🌸";

/// Which rule an utterance fell under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    NameIntroduction,
    NameQuestion,
    LearningIntent,
    Thanks,
    Other,
}

/// Keyword rules in priority order. First match wins.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Greeting, &["xin chào", "chào"]),
    (Topic::NameIntroduction, &["tôi tên là", "tên tôi là"]),
    (Topic::NameQuestion, &["bạn tên là gì"]),
    (Topic::LearningIntent, &["học tiếng việt", "muốn học"]),
    (Topic::Thanks, &["cảm ơn"]),
];

/// Classify an utterance by the first rule whose keywords it contains.
///
/// Accents must match exactly — "chao" is not "chào".
pub fn classify(text: &str) -> Topic {
    let input = text.trim().to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| input.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Other)
}

/// Produce the teacher's reply for an utterance. Never fails, never empty.
pub fn generate_reply(text: &str) -> String {
    match classify(text) {
        Topic::Greeting => format!(
            "Rất tốt! Bạn đã nói: \"{text}\". Câu này có nghĩa là: \"Hello!\" 👍 \
             Bây giờ hãy thử giới thiệu tên: \"Tôi tên là [tên của bạn]\" nhé!"
        ),
        Topic::NameIntroduction => format!(
            "Tuyệt vời! Bạn đã giới thiệu tên! 🎉 Câu \"{text}\" có nghĩa là \"My name is...\" \
             Hãy thử hỏi: \"Bạn tên là gì?\""
        ),
        Topic::NameQuestion => format!(
            "Hay quá! Bạn hỏi: \"{text}\" nghĩa là \"What is your name?\" \
             Tôi trả lời: \"Tôi tên là Cô Linh!\" 🌸"
        ),
        Topic::LearningIntent => "Tuyệt vời! Bạn muốn học tiếng Việt! 📚 Hãy bắt đầu với các số: \
             \"một, hai, ba, bốn, năm\" (one, two, three, four, five)."
            .to_string(),
        Topic::Thanks => format!(
            "Không có chi! \"{text}\" có nghĩa là \"Thank you\". 😊 \
             Hãy thử nói: \"Xin lỗi\" (Excuse me)."
        ),
        Topic::Other => format!(
            "Rất tốt! Bạn đã nói: \"{text}\". Tôi nghe thấy bạn đang cố gắng học! 🌸 \
             Hãy tiếp tục thực hành tiếng Việt nhé!"
        ),
    }
}
