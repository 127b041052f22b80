//! # Feature: Canned Replies
//!
//! Fixed response pools for the joke and quote intents plus the generic
//! fallback, selected uniformly at random per request.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with joke, quote, and fallback pools

use rand::Rng;

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my computer I needed a break, and it said 'no problem, I'll go to sleep.'",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a fake noodle? An impasta!",
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "What did the ocean say to the beach? Nothing, it just waved.",
    "Why don't eggs tell jokes? They'd crack each other up.",
];

const QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. — Steve Jobs",
    "It does not matter how slowly you go as long as you do not stop. — Confucius",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. — Winston Churchill",
    "The best time to plant a tree was 20 years ago. The second best time is now. — Chinese proverb",
    "Believe you can and you're halfway there. — Theodore Roosevelt",
    "The future belongs to those who believe in the beauty of their dreams. — Eleanor Roosevelt",
];

const FALLBACKS: &[&str] = &[
    "I'm not sure I understood that. You can ask me for a joke, a quote, a reminder, a translation, a call, a song, a video, or a WhatsApp message.",
    "Hmm, that's beyond me. Try asking for a reminder, a translation, or some music.",
    "I didn't quite get that. Ask me to remind you of something, play a song, or send a message.",
    "Sorry, I don't know how to help with that yet. I can set reminders, translate text, make calls, play media, and send WhatsApp messages.",
];

fn pick(pool: &[&str]) -> String {
    let mut rng = rand::rng();
    let index = rng.random_range(0..pool.len());
    pool[index].to_string()
}

/// A random joke from the fixed pool
pub fn joke() -> String {
    pick(JOKES)
}

/// A random quote from the fixed pool
pub fn quote() -> String {
    pick(QUOTES)
}

/// A random reply for utterances that matched no intent
pub fn fallback() -> String {
    pick(FALLBACKS)
}
