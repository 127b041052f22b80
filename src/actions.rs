//! # Feature: Action Directives
//!
//! Machine-readable directives embedded inline in otherwise natural-language
//! replies, e.g. `[SET_REMINDER: 2024-01-02T09:00:00]`. The embed and parse
//! sides share one keyword/field table so they cannot drift apart: a
//! directive is encoded from the `ActionDirective` sum type and decoded back
//! into it by the same module.
//!
//! Hosts call [`parse_actions`] on a full reply (matching every occurrence,
//! not just the first), act on the returned [`Action`] records, and only
//! then strip the bracket syntax with [`clean_response`] for display.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with the six directive kinds

use regex::Regex;
use serde::Serialize;

/// A typed action directive. Field order here is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionDirective {
    SetReminder { when: String },
    WhatsappLink { phone: String, message: String },
    Translate { language: String, text: String, oral: bool },
    Call { target: String, contact: String },
    PlayVideo { title: String },
    PlaySong { title: String },
}

impl ActionDirective {
    pub fn keyword(&self) -> &'static str {
        match self {
            ActionDirective::SetReminder { .. } => "SET_REMINDER",
            ActionDirective::WhatsappLink { .. } => "WHATSAPP_LINK",
            ActionDirective::Translate { .. } => "TRANSLATE",
            ActionDirective::Call { .. } => "CALL",
            ActionDirective::PlayVideo { .. } => "PLAY_VIDEO",
            ActionDirective::PlaySong { .. } => "PLAY_SONG",
        }
    }

    fn fields(&self) -> Vec<String> {
        match self {
            ActionDirective::SetReminder { when } => vec![when.clone()],
            ActionDirective::WhatsappLink { phone, message } => {
                vec![phone.clone(), message.clone()]
            }
            ActionDirective::Translate { language, text, oral } => {
                let mut fields = vec![language.clone(), text.clone()];
                if *oral {
                    fields.push("oral".to_string());
                }
                fields
            }
            ActionDirective::Call { target, contact } => vec![target.clone(), contact.clone()],
            ActionDirective::PlayVideo { title } => vec![title.clone()],
            ActionDirective::PlaySong { title } => vec![title.clone()],
        }
    }

    /// Render the directive in its bracket syntax. Field values are
    /// sanitized so the result is always re-extractable by [`parse_actions`].
    pub fn encode(&self) -> String {
        let payload: Vec<String> = self.fields().iter().map(|f| sanitize_field(f)).collect();
        format!("[{}: {}]", self.keyword(), payload.join("|"))
    }

    /// Rebuild a directive from its keyword and `|`-split payload. Unknown
    /// keywords, wrong arity, and empty required fields all yield `None` —
    /// a malformed directive is dropped, never surfaced half-parsed.
    fn from_parts(keyword: &str, parts: &[&str]) -> Option<Self> {
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match (keyword, parts) {
            ("SET_REMINDER", [when]) => Some(ActionDirective::SetReminder {
                when: (*when).to_string(),
            }),
            ("WHATSAPP_LINK", [phone, message]) => Some(ActionDirective::WhatsappLink {
                phone: (*phone).to_string(),
                message: (*message).to_string(),
            }),
            ("TRANSLATE", [language, text]) => Some(ActionDirective::Translate {
                language: (*language).to_string(),
                text: (*text).to_string(),
                oral: false,
            }),
            ("TRANSLATE", [language, text, "oral"]) => Some(ActionDirective::Translate {
                language: (*language).to_string(),
                text: (*text).to_string(),
                oral: true,
            }),
            ("CALL", [target, contact]) => Some(ActionDirective::Call {
                target: (*target).to_string(),
                contact: (*contact).to_string(),
            }),
            ("PLAY_VIDEO", [title]) => Some(ActionDirective::PlayVideo {
                title: (*title).to_string(),
            }),
            ("PLAY_SONG", [title]) => Some(ActionDirective::PlaySong {
                title: (*title).to_string(),
            }),
            _ => None,
        }
    }
}

/// A parsed directive plus host-facing derived data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(flatten)]
    pub directive: ActionDirective,
    /// Human-readable label for the action.
    pub text: String,
    /// Deep link, where the directive implies one (WhatsApp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Action {
    fn from_directive(directive: ActionDirective) -> Self {
        let (text, url) = match &directive {
            ActionDirective::SetReminder { when } => (format!("Reminder set for {}", when), None),
            ActionDirective::WhatsappLink { phone, message } => {
                let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
                let link = format!("https://wa.me/{}?text={}", digits, percent_encode(message));
                (format!("Send WhatsApp message to {}", phone), Some(link))
            }
            ActionDirective::Translate { language, oral, .. } => {
                let label = if *oral {
                    format!("Translate to {} out loud", language)
                } else {
                    format!("Translate to {}", language)
                };
                (label, None)
            }
            ActionDirective::Call { contact, .. } => (format!("Call {}", contact), None),
            ActionDirective::PlayVideo { title } => (format!("Play video: {}", title), None),
            ActionDirective::PlaySong { title } => (format!("Play song: {}", title), None),
        };
        Action {
            directive,
            text,
            url,
        }
    }
}

/// Scan a reply for every embedded directive and return the parsed actions
/// in order of appearance.
pub fn parse_actions(reply: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    for captures in directive_pattern().captures_iter(reply) {
        let keyword = &captures[1];
        let parts: Vec<&str> = captures[2].split('|').map(str::trim).collect();
        if let Some(directive) = ActionDirective::from_parts(keyword, &parts) {
            actions.push(Action::from_directive(directive));
        }
    }
    actions
}

/// Strip every bracketed directive from a reply, leaving the user-facing
/// text. Idempotent; must run after [`parse_actions`], never before.
pub fn clean_response(reply: &str) -> String {
    let stripped = directive_pattern().replace_all(reply, "");
    let collapsed = Regex::new(r"[ \t]{2,}")
        .unwrap()
        .replace_all(stripped.trim(), " ");
    collapsed.trim().to_string()
}

fn directive_pattern() -> Regex {
    Regex::new(r"\[([A-Z_]+):\s*([^\]]*)\]").unwrap()
}

fn sanitize_field(value: &str) -> String {
    value
        .chars()
        .filter(|&c| c != '[' && c != ']' && c != '|')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Minimal percent-encoding for the WhatsApp text parameter. Unreserved
/// characters pass through; everything else is %XX per UTF-8 byte.
fn percent_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
