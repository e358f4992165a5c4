//! Prompt assembly for the completion provider.

use crate::domain::message::ChatMessage;

/// System instruction establishing the assistant persona.
pub const PERSONA: &str = "Kamu adalah asisten kripto Indonesia handal dari Coinvestasi. \
    Jelaskan dengan bahasa santai, informatif, dan tidak menjanjikan keuntungan. \
    Jangan menjawab pertanyaan-pertanyaan yang tidak ada hubungannya dengan web3, \
    kripto, blockchain, investasi dan lainnya yang berhubungan.";

/// Disclaimer injected when a lookup was attempted but produced nothing.
const LOOKUP_FALLBACK: &str = "Catatan: pencarian web sedang tidak tersedia, jawab \
    berdasarkan pengetahuan umum dan sebutkan bahwa datanya mungkin tidak terkini.";

/// Outcome of the augmentation step, as seen by prompt assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmentation {
    /// The question did not need external context.
    NotNeeded,
    /// Formatted snippets fetched from the web. Never empty.
    Context(String),
    /// A lookup was warranted but failed or came back empty.
    Unavailable,
}

/// Assemble the ordered prompt: persona, recent history, optional web
/// context (or the fallback disclaimer), then the new question.
#[must_use]
pub fn build_prompt(
    history: &[ChatMessage],
    augmentation: &Augmentation,
    question: &str,
) -> Vec<ChatMessage> {
    let mut prompt = Vec::with_capacity(history.len() + 3);
    prompt.push(ChatMessage::system(PERSONA));
    prompt.extend_from_slice(history);

    match augmentation {
        Augmentation::NotNeeded => {}
        Augmentation::Context(context) => {
            prompt.push(ChatMessage::system(format!(
                "Konteks terbaru dari web:\n{context}"
            )));
        }
        Augmentation::Unavailable => {
            prompt.push(ChatMessage::system(LOOKUP_FALLBACK));
        }
    }

    prompt.push(ChatMessage::user(question));
    prompt
}
