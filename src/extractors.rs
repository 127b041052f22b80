//! # Feature: Slot Extraction
//!
//! Per-intent extraction of structured slots from a raw utterance. Each
//! extractor is a pure function trying a small ordered list of regex
//! patterns; the first match wins. Missing required slots surface as empty
//! fields or `None` so the dispatcher can ask a clarifying question instead
//! of emitting a broken directive.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release covering reminder, translation, call, video,
//!   song, and messaging slots

use regex::Regex;

/// Clock sub-pattern shared by the reminder time patterns: "at 5", "at 9:30pm".
const CLOCK: &str = r"at\s+\d{1,2}(?::[0-5]\d)?\s*(?:am|pm|a\.m\.|p\.m\.)?";

const WEEKDAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";

/// Slots for the reminder intent. Empty fields mean extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderSlots {
    pub task: String,
    pub time: String,
}

/// Slots for the translation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSlots {
    pub text: String,
    pub language: String,
    pub oral: bool,
}

/// Slots for the phone-call intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSlots {
    pub target: String,
    pub contact: String,
}

/// Slots for the WhatsApp/messaging intent. The phone number is the one
/// mandatory slot; contact and message carry defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSlots {
    pub phone: Option<String>,
    pub contact: String,
    pub message: String,
}

/// Extract task and time expression for a reminder.
///
/// The time clause is located first (weekday, tomorrow, or bare clock, in
/// that order so compound clauses like "friday at 2pm" stay intact). The
/// task is the text between "remind me to" and the time clause, or the
/// remainder of the utterance once the time clause is stripped.
pub fn reminder(utterance: &str) -> ReminderSlots {
    let time_patterns = [
        format!(r"(?i)\b(?:on\s+|next\s+|this\s+)?{WEEKDAY}\b(?:\s+{CLOCK})?"),
        format!(r"(?i)(?:\b{CLOCK}\s+)?\btomorrow\b(?:\s+{CLOCK})?"),
        format!(r"(?i)\b{CLOCK}"),
    ];

    let mut time = String::new();
    for pattern in &time_patterns {
        if let Some(found) = Regex::new(pattern).unwrap().find(utterance) {
            time = found.as_str().trim().to_string();
            break;
        }
    }

    let anchored = Regex::new(r"(?i)remind\s+me\s+to\s+(.+)").unwrap();
    let raw_task = match anchored.captures(utterance) {
        Some(captures) => captures[1].to_string(),
        None => utterance.to_string(),
    };
    let without_time = if time.is_empty() {
        raw_task
    } else {
        raw_task.replacen(&time, "", 1)
    };

    ReminderSlots {
        task: tidy_task(&without_time),
        time,
    }
}

fn tidy_task(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut words: Vec<&str> = collapsed.split(' ').filter(|w| !w.is_empty()).collect();

    while let Some(first) = words.first() {
        let word = first.trim_matches(|c: char| c.is_ascii_punctuation());
        if matches!(word.to_lowercase().as_str(), "remind" | "reminder" | "me" | "to" | "please") {
            words.remove(0);
        } else {
            break;
        }
    }
    while let Some(last) = words.last() {
        let word = last.trim_matches(|c: char| c.is_ascii_punctuation());
        if word.is_empty() || matches!(word.to_lowercase().as_str(), "at" | "on" | "please") {
            words.pop();
        } else {
            break;
        }
    }

    words
        .join(" ")
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string()
}

/// Extract text and target language for a translation request.
///
/// Three phrasings are recognized: quoted text ("translate 'X' to Y"), a
/// language-first prefix ("translate to Y: X"), and the plain form
/// ("translate X to Y"). The oral flag is keyword presence.
pub fn translation(utterance: &str) -> Option<TranslationSlots> {
    let lowercase_utterance = utterance.to_lowercase();
    let oral = ["orally", "out loud", "aloud"]
        .iter()
        .any(|&keyword| lowercase_utterance.contains(keyword));

    let patterns = [
        r#"(?i)translate\s+["'](.+?)["']\s+(?:to|into|in)\s+([a-zA-Z]+)"#,
        r"(?i)translate\s+(?:it\s+)?(?:to|into|in)\s+([a-zA-Z]+)\s*[:,]\s*(.+)",
        r"(?i)translate\s+(.+?)\s+(?:to|into|in)\s+([a-zA-Z]+)",
    ];

    for (index, pattern) in patterns.iter().enumerate() {
        if let Some(captures) = Regex::new(pattern).unwrap().captures(utterance) {
            // The prefix form captures language first.
            let (text, language) = if index == 1 {
                (captures[2].to_string(), captures[1].to_string())
            } else {
                (captures[1].to_string(), captures[2].to_string())
            };
            let text = text
                .trim_matches(|c: char| c.is_whitespace() || c == '.' || c == '!' || c == '?')
                .to_string();
            if text.is_empty() || language.is_empty() {
                continue;
            }
            return Some(TranslationSlots {
                text,
                language: language.to_lowercase(),
                oral,
            });
        }
    }
    None
}

/// Extract the call target. A phone-number pattern is preferred over a bare
/// name; for a phone number, the contact label is the whitespace-stripped
/// number itself.
pub fn call(utterance: &str) -> Option<CallSlots> {
    let phone_pattern = Regex::new(r"(?i)\bcall\s+(\+?\d[\d\s\-]{6,}\d)").unwrap();
    if let Some(captures) = phone_pattern.captures(utterance) {
        let normalized: String = captures[1].chars().filter(|c| !c.is_whitespace()).collect();
        return Some(CallSlots {
            target: normalized.clone(),
            contact: normalized,
        });
    }

    let name_pattern = Regex::new(r"(?i)\bcall\s+([a-zA-Z][a-zA-Z .'\-]*)").unwrap();
    if let Some(captures) = name_pattern.captures(utterance) {
        let name = captures[1]
            .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .to_string();
        if !name.is_empty() {
            return Some(CallSlots {
                target: name.clone(),
                contact: name,
            });
        }
    }
    None
}

/// Extract a video title from the common phrasings.
pub fn video_title(utterance: &str) -> Option<String> {
    let patterns = [
        r"(?i)(?:play|show)(?:\s+(?:me|us))?(?:\s+(?:a|an|the|some))?\s+video\s+(?:of|about|on|for|called)\s+(.+)",
        r"(?i)(?:play|show)(?:\s+(?:me|us))?(?:\s+(?:a|an|the|some))?\s+video\s+(.+)",
        r"(?i)(?:play|show)\s+(.+?)\s+video",
    ];

    for pattern in patterns {
        if let Some(captures) = Regex::new(pattern).unwrap().captures(utterance) {
            let title = strip_leading_article(tidy_title(&captures[1]));
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}

/// Generic non-titles a song request must not resolve to.
const SONG_DENYLIST: &[&str] = &[
    "video", "music", "song", "songs", "a song", "some music",
    "something", "anything", "it", "that",
];

/// Extract a song title, looping through the pattern matches until a
/// plausible title turns up: not on the denylist and at least three
/// characters long.
pub fn song_title(utterance: &str) -> Option<String> {
    let patterns = [
        r"(?i)play\s+(?:the\s+)?song\s+(?:called\s+|named\s+)?(.+)",
        r"(?i)play\s+(?:some\s+)?music\s+(?:by|from)\s+(.+)",
        r"(?i)play\s+(?:some\s+)?(.+?)\s+(?:song|music)\s*$",
        r"(?i)play\s+(?:me\s+)?(.+)",
    ];

    for pattern in patterns {
        if let Some(captures) = Regex::new(pattern).unwrap().captures(utterance) {
            let title = tidy_title(&captures[1]);
            if plausible_song_title(&title) {
                return Some(title);
            }
        }
    }
    None
}

fn plausible_song_title(title: &str) -> bool {
    let lowercase_title = title.to_lowercase();
    title.len() >= 3 && !SONG_DENYLIST.contains(&lowercase_title.as_str())
}

fn tidy_title(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '!' || c == '?')
        .trim()
        .to_string()
}

fn strip_leading_article(title: String) -> String {
    let mut words: Vec<&str> = title.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() > 1
        && matches!(words[0].to_lowercase().as_str(), "a" | "an" | "the" | "some")
    {
        words.remove(0);
    }
    words.join(" ")
}

/// Filler that can sit between "message"/"text" and the contact name, and
/// words that never are one.
const CONTACT_STOPWORDS: &[&str] = &[
    "me", "him", "her", "them", "that", "this", "it", "on", "saying", "say",
];

/// Extract messaging slots. The phone number (10–15 digits, optional
/// leading "+") is required; contact and message body fall back to
/// defaults when absent.
pub fn whatsapp(utterance: &str) -> MessageSlots {
    let phone_pattern = Regex::new(r"\+?\d{10,15}").unwrap();
    let phone = phone_pattern.find(utterance).map(|m| m.as_str().to_string());

    let contact_pattern =
        Regex::new(r"(?i)(?:message|text|whatsapp)\s+(?:(?:to|a|an|the|my)\s+)*([a-zA-Z]+)")
            .unwrap();
    let contact = contact_pattern
        .captures(utterance)
        .map(|captures| captures[1].to_string())
        .filter(|word| !CONTACT_STOPWORDS.contains(&word.to_lowercase().as_str()))
        .unwrap_or_else(|| "friend".to_string());

    let quoted_pattern = Regex::new(r#"(?i)(?:say|tell|message)[a-z]*\s+["'](.+?)["']"#).unwrap();
    let prefix_pattern = Regex::new(r"(?i)message\s*:\s*(.+)").unwrap();
    let message = quoted_pattern
        .captures(utterance)
        .or_else(|| prefix_pattern.captures(utterance))
        .map(|captures| captures[1].trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "Hello!".to_string());

    MessageSlots {
        phone,
        contact,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_task_and_clock() {
        let slots = reminder("remind me to call mom at 9am");
        assert_eq!(slots.task, "call mom");
        assert_eq!(slots.time, "at 9am");
    }

    #[test]
    fn test_reminder_tomorrow_clause_stays_whole() {
        let slots = reminder("remind me to call mom tomorrow at 3pm");
        assert_eq!(slots.task, "call mom");
        assert_eq!(slots.time, "tomorrow at 3pm");
    }

    #[test]
    fn test_reminder_weekday_clause() {
        let slots = reminder("remind me to submit the report on friday at 2pm");
        assert_eq!(slots.task, "submit the report");
        assert_eq!(slots.time, "on friday at 2pm");
    }

    #[test]
    fn test_reminder_without_anchor_phrase() {
        let slots = reminder("remind me tomorrow to water the plants");
        assert_eq!(slots.task, "water the plants");
        assert_eq!(slots.time, "tomorrow");
    }

    #[test]
    fn test_reminder_missing_time_is_empty() {
        let slots = reminder("remind me to stretch");
        assert_eq!(slots.task, "stretch");
        assert!(slots.time.is_empty(), "no time clause should leave time empty");
    }

    #[test]
    fn test_reminder_missing_task_is_empty() {
        let slots = reminder("remind me at 5pm");
        assert!(slots.task.is_empty(), "no task should leave task empty, got '{}'", slots.task);
        assert_eq!(slots.time, "at 5pm");
    }

    #[test]
    fn test_translation_plain_form() {
        let slots = translation("translate good morning to french").unwrap();
        assert_eq!(slots.text, "good morning");
        assert_eq!(slots.language, "french");
        assert!(!slots.oral);
    }

    #[test]
    fn test_translation_quoted_form() {
        let slots = translation("translate \"where is the station\" into japanese").unwrap();
        assert_eq!(slots.text, "where is the station");
        assert_eq!(slots.language, "japanese");
    }

    #[test]
    fn test_translation_prefix_form() {
        let slots = translation("translate to spanish: see you tomorrow").unwrap();
        assert_eq!(slots.text, "see you tomorrow");
        assert_eq!(slots.language, "spanish");
    }

    #[test]
    fn test_translation_oral_flag() {
        let slots = translation("translate hello to german orally").unwrap();
        assert_eq!(slots.language, "german");
        assert!(slots.oral, "the orally keyword should set the flag");
    }

    #[test]
    fn test_translation_missing_language() {
        assert!(translation("translate this").is_none());
    }

    #[test]
    fn test_call_prefers_phone_number() {
        let slots = call("call 98 7654 3210 now").unwrap();
        assert_eq!(slots.target, "9876543210");
        assert_eq!(slots.contact, "9876543210", "contact label equals the stripped number");
    }

    #[test]
    fn test_call_by_name() {
        let slots = call("call mom").unwrap();
        assert_eq!(slots.target, "mom");
        assert_eq!(slots.contact, "mom");
    }

    #[test]
    fn test_call_without_target() {
        assert!(call("make a call").is_none());
    }

    #[test]
    fn test_video_title_variants() {
        assert_eq!(video_title("play video of baby elephants").unwrap(), "baby elephants");
        assert_eq!(video_title("show me a video about rust").unwrap(), "rust");
        assert_eq!(video_title("play the minecraft video").unwrap(), "minecraft");
    }

    #[test]
    fn test_video_without_title() {
        assert!(video_title("play video").is_none());
    }

    #[test]
    fn test_song_title_variants() {
        assert_eq!(song_title("play the song bohemian rhapsody").unwrap(), "bohemian rhapsody");
        assert_eq!(song_title("play music by queen").unwrap(), "queen");
        assert_eq!(song_title("play some jazz music").unwrap(), "jazz");
    }

    #[test]
    fn test_song_denylist_rejects_generic_request() {
        assert!(song_title("play a song").is_none(), "'a song' is not a title");
        assert!(song_title("play music").is_none(), "'music' is not a title");
    }

    #[test]
    fn test_whatsapp_full_extraction() {
        let slots = whatsapp("message John 9876543210 saying 'hi'");
        assert_eq!(slots.phone.as_deref(), Some("9876543210"));
        assert_eq!(slots.contact, "John");
        assert_eq!(slots.message, "hi");
    }

    #[test]
    fn test_whatsapp_defaults() {
        let slots = whatsapp("whatsapp +919876543210");
        assert_eq!(slots.phone.as_deref(), Some("+919876543210"));
        assert_eq!(slots.contact, "friend");
        assert_eq!(slots.message, "Hello!");
    }

    #[test]
    fn test_whatsapp_message_prefix_form() {
        let slots = whatsapp("text Anna 9876543210 message: running late");
        assert_eq!(slots.contact, "Anna");
        assert_eq!(slots.message, "running late");
    }

    #[test]
    fn test_whatsapp_requires_phone() {
        let slots = whatsapp("message John");
        assert!(slots.phone.is_none(), "no digits should leave phone empty");
    }

    #[test]
    fn test_whatsapp_contact_skips_stopwords() {
        let slots = whatsapp("send a text to John 9876543210");
        assert_eq!(slots.contact, "John");
    }
}
