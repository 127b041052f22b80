//! # Feature: Assistant Dispatcher
//!
//! The top-level request pipeline: authorization, content filter, intent
//! routing, slot extraction, and reply templating. Every call completes
//! synchronously and returns a reply string; replies that imply a host
//! action carry an embedded directive for [`crate::actions::parse_actions`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with the eight intents and profile setters

use crate::actions::ActionDirective;
use crate::content_filter;
use crate::extractors;
use crate::profile::{AssistantProfile, ProfileStore};
use crate::replies;
use crate::router::{self, Intent};
use crate::time_parser;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{debug, info};

const EMPTY_INPUT_REPLY: &str = "I didn't catch that. What can I do for you?";
const REMINDER_CLARIFY: &str = "What should I remind you about, and when?";
const TRANSLATE_CLARIFY: &str = "What should I translate, and into which language?";
const CALL_CLARIFY: &str = "Who would you like me to call?";
const VIDEO_CLARIFY: &str = "Which video would you like to watch?";
const SONG_CLARIFY: &str = "Which song would you like to hear?";
const WHATSAPP_CLARIFY: &str =
    "I can send that, but I need a phone number. Who should I message, and what's their number?";

/// The MPA assistant. Holds the profile by constructor injection; the
/// optional store is only touched by the setters.
pub struct Assistant {
    profile: AssistantProfile,
    store: Option<ProfileStore>,
}

impl Assistant {
    /// Build an assistant backed by a profile store.
    pub fn new(store: ProfileStore) -> Self {
        let profile = store.load_profile();
        info!("Assistant ready for {} (language: {})", profile.user_name, profile.language);
        Assistant {
            profile,
            store: Some(store),
        }
    }

    /// Build an assistant with no storage, e.g. when the host has none.
    pub fn with_profile(profile: AssistantProfile) -> Self {
        Assistant {
            profile,
            store: None,
        }
    }

    pub fn profile(&self) -> &AssistantProfile {
        &self.profile
    }

    pub fn set_user_name(&mut self, name: &str) -> Result<()> {
        self.profile.user_name = name.trim().to_string();
        if let Some(store) = &self.store {
            store.save_name(&self.profile.user_name)?;
        }
        Ok(())
    }

    pub fn set_gender(&mut self, gender: &str) -> Result<()> {
        self.profile.gender = gender.trim().to_string();
        if let Some(store) = &self.store {
            store.save_gender(&self.profile.gender)?;
        }
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.profile.language = language.trim().to_string();
        if let Some(store) = &self.store {
            store.save_language(&self.profile.language)?;
        }
        Ok(())
    }

    /// Lock (or unlock, with `None`) the assistant to a single caller.
    /// Session-lifetime only; never persisted.
    pub fn set_registered_user(&mut self, user: Option<&str>) {
        self.profile.registered_user = user.map(|u| u.to_string());
        match &self.profile.registered_user {
            Some(owner) => info!("Assistant locked to registered user {}", owner),
            None => info!("Assistant open to all callers"),
        }
    }

    /// Greeting for interactive hosts.
    pub fn greeting(&self) -> String {
        format!(
            "Hello {}! I'm your assistant. Ask me for a joke, a reminder, a translation, a call, a song, a video, or a WhatsApp message.",
            self.profile.user_name
        )
    }

    /// Whether a caller may use this instance. Open mode (no registered
    /// user) authorizes everyone; otherwise only an exact identity match.
    pub fn is_authorized(&self, caller: Option<&str>) -> bool {
        match &self.profile.registered_user {
            None => true,
            Some(owner) => caller == Some(owner.as_str()),
        }
    }

    /// Process one utterance through the full pipeline and return the
    /// reply, directives included. Never panics on malformed input.
    pub fn process_message(&self, utterance: &str, caller: Option<&str>) -> String {
        self.process_message_at(utterance, caller, Local::now().naive_local())
    }

    fn process_message_at(
        &self,
        utterance: &str,
        caller: Option<&str>,
        now: NaiveDateTime,
    ) -> String {
        let trimmed = utterance.trim();
        if trimmed.is_empty() {
            return EMPTY_INPUT_REPLY.to_string();
        }

        if !self.is_authorized(caller) {
            debug!("Rejected utterance from unauthorized caller {:?}", caller);
            return self.unauthorized_reply();
        }

        if content_filter::contains_prohibited(trimmed) {
            return content_filter::DECLINE_REPLY.to_string();
        }

        match router::classify(trimmed) {
            Some(Intent::Joke) => replies::joke(),
            Some(Intent::Quote) => replies::quote(),
            Some(Intent::Reminder) => self.handle_reminder(trimmed, now),
            Some(Intent::Translate) => self.handle_translation(trimmed),
            Some(Intent::Call) => self.handle_call(trimmed),
            Some(Intent::PlayVideo) => self.handle_video(trimmed),
            Some(Intent::PlaySong) => self.handle_song(trimmed),
            Some(Intent::Message) => self.handle_whatsapp(trimmed),
            None => replies::fallback(),
        }
    }

    fn unauthorized_reply(&self) -> String {
        let owner = if self.profile.user_name.is_empty() {
            "my registered user"
        } else {
            self.profile.user_name.as_str()
        };
        format!("Sorry, I only take requests from {}.", owner)
    }

    fn handle_reminder(&self, utterance: &str, now: NaiveDateTime) -> String {
        let slots = extractors::reminder(utterance);
        if slots.task.is_empty() || slots.time.is_empty() {
            return REMINDER_CLARIFY.to_string();
        }
        match time_parser::resolve(&slots.time, now) {
            Some(resolved) => {
                let directive = ActionDirective::SetReminder {
                    when: time_parser::to_iso(&resolved),
                };
                format!(
                    "Okay, I'll remind you to {} on {}. {}",
                    slots.task,
                    time_parser::humanize(&resolved),
                    directive.encode()
                )
            }
            None => REMINDER_CLARIFY.to_string(),
        }
    }

    fn handle_translation(&self, utterance: &str) -> String {
        match extractors::translation(utterance) {
            Some(slots) => {
                let reply_text = format!("Translating \"{}\" into {}.", slots.text, slots.language);
                let directive = ActionDirective::Translate {
                    language: slots.language,
                    text: slots.text,
                    oral: slots.oral,
                };
                format!("{} {}", reply_text, directive.encode())
            }
            None => TRANSLATE_CLARIFY.to_string(),
        }
    }

    fn handle_call(&self, utterance: &str) -> String {
        match extractors::call(utterance) {
            Some(slots) => {
                let reply_text = format!("Calling {}...", slots.contact);
                let directive = ActionDirective::Call {
                    target: slots.target,
                    contact: slots.contact,
                };
                format!("{} {}", reply_text, directive.encode())
            }
            None => CALL_CLARIFY.to_string(),
        }
    }

    fn handle_video(&self, utterance: &str) -> String {
        match extractors::video_title(utterance) {
            Some(title) => {
                let reply_text = format!("Playing video: {}.", title);
                let directive = ActionDirective::PlayVideo { title };
                format!("{} {}", reply_text, directive.encode())
            }
            None => VIDEO_CLARIFY.to_string(),
        }
    }

    fn handle_song(&self, utterance: &str) -> String {
        match extractors::song_title(utterance) {
            Some(title) => {
                let reply_text = format!("Playing {} for you.", title);
                let directive = ActionDirective::PlaySong { title };
                format!("{} {}", reply_text, directive.encode())
            }
            None => SONG_CLARIFY.to_string(),
        }
    }

    fn handle_whatsapp(&self, utterance: &str) -> String {
        let slots = extractors::whatsapp(utterance);
        match slots.phone {
            Some(phone) => {
                let reply_text = format!("Sending your WhatsApp message to {}.", slots.contact);
                let directive = ActionDirective::WhatsappLink {
                    phone,
                    message: slots.message,
                };
                format!("{} {}", reply_text, directive.encode())
            }
            None => WHATSAPP_CLARIFY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{parse_actions, ActionDirective};
    use chrono::NaiveDate;

    fn open_assistant() -> Assistant {
        Assistant::with_profile(AssistantProfile::default())
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_unauthorized_caller_gets_fixed_reply_and_no_actions() {
        let mut assistant = open_assistant();
        assistant.set_registered_user(Some("owner-1"));

        let reply = assistant.process_message("tell me a joke", Some("other-user"));
        assert_eq!(reply, "Sorry, I only take requests from MPA.");
        assert!(parse_actions(&reply).is_empty(), "rejections carry no directives");
    }

    #[test]
    fn test_owner_is_authorized() {
        let mut assistant = open_assistant();
        assistant.set_registered_user(Some("owner-1"));
        assert!(assistant.is_authorized(Some("owner-1")));
        assert!(!assistant.is_authorized(None));
    }

    #[test]
    fn test_open_mode_authorizes_everyone() {
        let assistant = open_assistant();
        assert!(assistant.is_authorized(None));
        assert!(assistant.is_authorized(Some("anyone")));
    }

    #[test]
    fn test_prohibited_content_is_declined() {
        let assistant = open_assistant();
        let reply = assistant.process_message("play adult video", None);
        assert_eq!(reply, content_filter::DECLINE_REPLY);
        assert!(parse_actions(&reply).is_empty());
    }

    #[test]
    fn test_empty_utterance_is_validated_at_boundary() {
        let assistant = open_assistant();
        assert_eq!(assistant.process_message("   ", None), EMPTY_INPUT_REPLY);
    }

    #[test]
    fn test_reminder_rolls_past_time_to_tomorrow() {
        let assistant = open_assistant();
        let reply =
            assistant.process_message_at("remind me to call mom at 9am", None, fixed_now());
        let actions = parse_actions(&reply);
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].directive,
            ActionDirective::SetReminder {
                when: "2024-01-02T09:00:00".to_string()
            }
        );
    }

    #[test]
    fn test_reminder_tomorrow_override() {
        let assistant = open_assistant();
        let reply = assistant.process_message_at(
            "remind me to call mom tomorrow at 3pm",
            None,
            fixed_now(),
        );
        let actions = parse_actions(&reply);
        assert_eq!(
            actions[0].directive,
            ActionDirective::SetReminder {
                when: "2024-01-02T15:00:00".to_string()
            }
        );
    }

    #[test]
    fn test_reminder_without_slots_asks_for_clarification() {
        let assistant = open_assistant();
        let reply = assistant.process_message("remind me", None);
        assert_eq!(reply, REMINDER_CLARIFY);
        assert!(parse_actions(&reply).is_empty());
    }

    #[test]
    fn test_whatsapp_requires_phone_number() {
        let assistant = open_assistant();

        let reply = assistant.process_message("message John", None);
        assert_eq!(reply, WHATSAPP_CLARIFY);
        assert!(parse_actions(&reply).is_empty(), "no phone, no directive");

        let reply = assistant.process_message("message John 9876543210 saying 'hi'", None);
        let actions = parse_actions(&reply);
        assert_eq!(actions.len(), 1, "exactly one directive expected");
        assert_eq!(
            actions[0].directive,
            ActionDirective::WhatsappLink {
                phone: "9876543210".to_string(),
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_generic_song_request_asks_which_song() {
        let assistant = open_assistant();
        let reply = assistant.process_message("play a song", None);
        assert_eq!(reply, SONG_CLARIFY);
        assert!(parse_actions(&reply).is_empty());
    }

    #[test]
    fn test_translation_round_trip() {
        let assistant = open_assistant();
        let reply = assistant.process_message("translate good morning to french", None);
        let actions = parse_actions(&reply);
        assert_eq!(
            actions[0].directive,
            ActionDirective::Translate {
                language: "french".to_string(),
                text: "good morning".to_string(),
                oral: false,
            }
        );
    }

    #[test]
    fn test_call_by_number_uses_stripped_number_as_contact() {
        let assistant = open_assistant();
        let reply = assistant.process_message("call 98 7654 3210", None);
        let actions = parse_actions(&reply);
        assert_eq!(
            actions[0].directive,
            ActionDirective::Call {
                target: "9876543210".to_string(),
                contact: "9876543210".to_string(),
            }
        );
    }

    #[test]
    fn test_fallback_for_unmatched_utterance() {
        let assistant = open_assistant();
        let reply = assistant.process_message("how are you today", None);
        assert!(!reply.is_empty());
        assert!(parse_actions(&reply).is_empty(), "fallbacks carry no directives");
    }

    #[test]
    fn test_setters_update_profile() {
        let mut assistant = open_assistant();
        assistant.set_user_name("Asha").unwrap();
        assistant.set_gender("she/her").unwrap();
        assistant.set_language("hi").unwrap();

        assert_eq!(assistant.profile().user_name, "Asha");
        assert_eq!(assistant.profile().gender, "she/her");
        assert_eq!(assistant.profile().language, "hi");
    }

    #[test]
    fn test_unauthorized_reply_names_current_owner() {
        let mut assistant = open_assistant();
        assistant.set_user_name("Asha").unwrap();
        assistant.set_registered_user(Some("owner-1"));

        let reply = assistant.process_message("play music", Some("stranger"));
        assert!(reply.contains("Asha"), "apology should name the owner: {}", reply);
    }
}
