//! Wire types for the backend API.
//!
//! The backend's response shapes are duck-typed (fields come and go), so
//! everything here is tolerant: unknown fields are ignored, missing optional
//! fields get the documented defaults, and messages that decode to nothing
//! are dropped rather than failing the whole response.

use chrono::{DateTime, Utc};
use leafscan_domain::{Diagnosis, Message, Role, Session, User};
use serde::Deserialize;
use tracing::warn;

/// `{token}` returned by signup/login/oauth-callback.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `{url}` returned by `/auth/google/url`.
#[derive(Debug, Deserialize)]
pub struct GoogleUrlResponse {
    pub url: String,
}

/// Classification result from `/detection/upload`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub predicted_class: String,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub treatment: Option<Vec<String>>,
}

impl UploadResponse {
    /// Map into the domain shape, applying the defaulting rules: absent
    /// symptom/treatment lists get a single generic entry.
    pub fn into_diagnosis(self) -> Diagnosis {
        Diagnosis::new(
            self.predicted_class,
            self.symptoms
                .unwrap_or_else(|| vec!["Analysis complete".to_string()]),
            self.treatment
                .unwrap_or_else(|| vec!["Consult an expert".to_string()]),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct WireDiagnosis {
    pub disease: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
}

impl From<WireDiagnosis> for Diagnosis {
    fn from(wire: WireDiagnosis) -> Self {
        Diagnosis::new(wire.disease, wire.symptoms, wire.treatment)
    }
}

/// A Message-shaped object from `/chat` or `/history`.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub id: Option<String>,
    /// The backend historically used `type` for the role field.
    #[serde(default, alias = "type")]
    pub role: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub diagnosis: Option<WireDiagnosis>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl WireMessage {
    /// Convert into a domain message. An unrecognized or missing role
    /// defaults to `ai` (the backend only ever authors AI turns); a message
    /// carrying no content at all yields `None`.
    pub fn into_message(self) -> Option<Message> {
        let role = self
            .role
            .as_deref()
            .and_then(|r| r.parse::<Role>().ok())
            .unwrap_or(Role::Ai);

        match Message::from_wire(
            self.id,
            role,
            self.text,
            self.image,
            self.diagnosis.map(Into::into),
            self.timestamp,
        ) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("dropping empty wire message: {e}");
                None
            }
        }
    }
}

/// A Session-shaped object from `/history`.
#[derive(Debug, Deserialize)]
pub struct WireSession {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<WireMessage>,
    pub thumbnail: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl WireSession {
    pub fn into_session(self) -> Session {
        let messages: Vec<Message> = self
            .messages
            .into_iter()
            .filter_map(WireMessage::into_message)
            .collect();
        Session::from_wire(
            self.id,
            messages,
            self.thumbnail,
            self.date.unwrap_or_else(Utc::now),
        )
    }
}

/// Profile shape from `/auth/user` and `/profile`.
#[derive(Debug, Deserialize)]
pub struct WireUser {
    pub name: Option<String>,
    pub email: String,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        match wire.name {
            Some(name) if !name.is_empty() => User::new(name, wire.email),
            _ => User::from_email(wire.email),
        }
    }
}
