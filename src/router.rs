//! # Feature: Intent Routing
//!
//! Classifies a lowercased utterance into an intent by walking an ordered
//! table of predicates; the first match wins, so intent priority lives in
//! one place. No fuzzy matching, no scoring, one intent per utterance.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with the eight intents and their priority order

/// The categories a user utterance is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Joke,
    Quote,
    Reminder,
    Translate,
    Call,
    PlayVideo,
    PlaySong,
    Message,
}

type Predicate = fn(&str) -> bool;

/// Ordered dispatch table. Earlier entries outrank later ones, so
/// "remind me to call mom" is a reminder, not a call.
const ROUTES: &[(Intent, Predicate)] = &[
    (Intent::Joke, wants_joke),
    (Intent::Quote, wants_quote),
    (Intent::Reminder, wants_reminder),
    (Intent::Translate, wants_translation),
    (Intent::Call, wants_call),
    (Intent::PlayVideo, wants_video),
    (Intent::PlaySong, wants_song),
    (Intent::Message, wants_message),
];

/// Classify an utterance. `None` means no intent matched and the caller
/// should fall back to a generic reply.
pub fn classify(utterance: &str) -> Option<Intent> {
    let lowercase_utterance = utterance.to_lowercase();
    ROUTES
        .iter()
        .find(|(_, predicate)| predicate(&lowercase_utterance))
        .map(|&(intent, _)| intent)
}

fn wants_joke(text: &str) -> bool {
    text.contains("joke")
}

fn wants_quote(text: &str) -> bool {
    text.contains("quote")
}

fn wants_reminder(text: &str) -> bool {
    text.contains("remind")
}

fn wants_translation(text: &str) -> bool {
    text.contains("translate")
}

fn wants_call(text: &str) -> bool {
    text.contains("call ")
}

fn wants_video(text: &str) -> bool {
    text.contains("play video")
        || text.contains("show video")
        || (text.contains("video") && (text.contains("play") || text.contains("show")))
}

fn wants_song(text: &str) -> bool {
    text.contains("play song")
        || text.contains("play music")
        || (text.contains("song") && text.contains("play"))
}

fn wants_message(text: &str) -> bool {
    text.contains("message") || text.contains("whatsapp") || text.contains("text")
}
