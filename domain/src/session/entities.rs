//! Session domain entities

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Author of a message in a diagnosis conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "ai" | "assistant" => Ok(Role::Ai),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Structured classification result for a plant image (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease: String,
    pub symptoms: Vec<String>,
    pub treatment: Vec<String>,
}

impl Diagnosis {
    pub fn new(
        disease: impl Into<String>,
        symptoms: Vec<String>,
        treatment: Vec<String>,
    ) -> Self {
        Self {
            disease: disease.into(),
            symptoms,
            treatment,
        }
    }
}

/// Ids are derived from creation time: the current millisecond, bumped past
/// the last issued value so two ids created in the same millisecond stay
/// unique and strictly increasing.
fn monotonic_millis() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = Utc::now().timestamp_millis();
    let mut last = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

pub(crate) fn next_id() -> String {
    monotonic_millis().to_string()
}

/// A single turn in a diagnosis conversation (Entity)
///
/// A message carries at least one of: free text, an encoded image (data URI),
/// or a [`Diagnosis`]. The role is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: String,
    role: Role,
    text: Option<String>,
    image: Option<String>,
    diagnosis: Option<Diagnosis>,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Checked constructor enforcing the "not empty" invariant.
    pub fn new(
        role: Role,
        text: Option<String>,
        image: Option<String>,
        diagnosis: Option<Diagnosis>,
    ) -> Result<Self, DomainError> {
        if text.is_none() && image.is_none() && diagnosis.is_none() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            id: next_id(),
            role,
            text,
            image,
            diagnosis,
            timestamp: Utc::now(),
        })
    }

    /// Rebuild a message received from the backend, keeping its id and
    /// timestamp when the wire provided them.
    pub fn from_wire(
        id: Option<String>,
        role: Role,
        text: Option<String>,
        image: Option<String>,
        diagnosis: Option<Diagnosis>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        let mut message = Self::new(role, text, image, diagnosis)?;
        if let Some(id) = id {
            message.id = id;
        }
        if let Some(ts) = timestamp {
            message.timestamp = ts;
        }
        Ok(message)
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, Some(text.into()), None, None)
            .expect("text message is never empty")
    }

    pub fn user_image(image: impl Into<String>, text: Option<String>) -> Self {
        Self::new(Role::User, text, Some(image.into()), None)
            .expect("image message is never empty")
    }

    pub fn ai_text(text: impl Into<String>) -> Self {
        Self::new(Role::Ai, Some(text.into()), None, None)
            .expect("text message is never empty")
    }

    pub fn ai_diagnosis(diagnosis: Diagnosis) -> Self {
        Self::new(Role::Ai, None, None, Some(diagnosis))
            .expect("diagnosis message is never empty")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnosis.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// One diagnosis conversation (Entity)
///
/// Messages are append-only; insertion order is chronological order. The
/// thumbnail tracks the most recent message image and is never cleared once
/// set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: String,
    messages: Vec<Message>,
    thumbnail: Option<String>,
    date: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: next_id(),
            messages: Vec::new(),
            thumbnail: None,
            date: Utc::now(),
        }
    }

    /// Rebuild a session received from the backend history.
    pub fn from_wire(
        id: String,
        messages: Vec<Message>,
        thumbnail: Option<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            messages,
            thumbnail,
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, updating the thumbnail if the message carries an
    /// image.
    pub fn append(&mut self, message: Message) {
        if let Some(image) = message.image() {
            self.thumbnail = Some(image.to_string());
        }
        self.messages.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_rejected() {
        let result = Message::new(Role::User, None, None, None);
        assert!(matches!(result, Err(DomainError::EmptyMessage)));
    }

    #[test]
    fn constructors_set_role() {
        assert_eq!(Message::user_text("hello").role(), Role::User);
        assert_eq!(Message::ai_text("hi").role(), Role::Ai);
        let diagnosis = Diagnosis::new("Early Blight", vec![], vec![]);
        assert_eq!(Message::ai_diagnosis(diagnosis).role(), Role::Ai);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = Message::user_text("one");
        let b = Message::user_text("two");
        let a_id: i64 = a.id().parse().unwrap();
        let b_id: i64 = b.id().parse().unwrap();
        assert!(b_id > a_id);
    }

    #[test]
    fn append_updates_thumbnail_on_image() {
        let mut session = Session::new();
        assert!(session.thumbnail().is_none());

        session.append(Message::user_image("data:image/png;base64,AAAA", None));
        assert_eq!(session.thumbnail(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn text_message_leaves_thumbnail_unchanged() {
        let mut session = Session::new();
        session.append(Message::user_image("data:image/png;base64,AAAA", None));
        session.append(Message::user_text("still there?"));
        assert_eq!(session.thumbnail(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn role_parses_from_wire_strings() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("ai".parse::<Role>().unwrap(), Role::Ai);
        assert!("robot".parse::<Role>().is_err());
    }
}
