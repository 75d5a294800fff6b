//! Chat/session manager service.
//!
//! Owns the in-memory [`SessionStore`] and drives every state transition a
//! diagnosis conversation can undergo: starting and switching sessions,
//! appending messages, and the image-analysis request/response cycle.
//!
//! # Failure posture
//!
//! [`analyze_image`](ChatManager::analyze_image) never fails outward. Every
//! failure path (malformed data URI, network error, bad response) still
//! produces exactly one appended AI message explaining that the analysis
//! failed, so the conversation is always left in a consistent state. Chat
//! turns ([`send_text`](ChatManager::send_text)) propagate errors instead,
//! so the caller can display them.

use crate::ports::chat_gateway::ChatGateway;
use crate::ports::classifier::{ImageClassifier, ImagePayload};
use crate::ports::gateway::GatewayError;
use leafscan_domain::{DataUri, DataUriError, Message, Session, SessionStore};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// User-facing fallback appended when an analysis fails for any reason.
const ANALYSIS_FALLBACK: &str =
    "Sorry, I could not analyze the image. Please try again with a clear photo of the plant.";

/// Errors that can occur while sending a chat turn.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("Invalid image: {0}")]
    BadImage(#[from] DataUriError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Internal error for the analysis pipeline. Logged, never surfaced.
#[derive(Error, Debug)]
enum AnalysisError {
    #[error("could not decode image: {0}")]
    Decode(#[from] DataUriError),

    #[error("classification request failed: {0}")]
    Request(#[from] GatewayError),
}

/// Service owning the session collection and the current session.
///
/// All store access goes through one mutex, mirroring the single-writer
/// event loop of the UI this state machine models. Port calls are the only
/// suspension points; the lock is never held across them.
pub struct ChatManager {
    store: Mutex<SessionStore>,
    classifier: Arc<dyn ImageClassifier>,
    chat: Arc<dyn ChatGateway>,
}

impl ChatManager {
    pub fn new(classifier: Arc<dyn ImageClassifier>, chat: Arc<dyn ChatGateway>) -> Self {
        Self {
            store: Mutex::new(SessionStore::new()),
            classifier,
            chat,
        }
    }

    /// Start a fresh session and make it current. Returns its id.
    pub async fn start_session(&self) -> String {
        self.store.lock().await.start_session().id().to_string()
    }

    /// Append a message to the current session (starting one implicitly if
    /// needed). Returns the id of the session that received it.
    pub async fn add_message(&self, message: Message) -> String {
        self.store.lock().await.add_message(message)
    }

    /// Switch the current session. Unknown ids leave it unchanged.
    pub async fn load_session(&self, id: &str) -> bool {
        self.store.lock().await.load_session(id)
    }

    /// Snapshot of the current session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.store.lock().await.current().cloned()
    }

    /// Snapshot of all known sessions, most recent first.
    pub async fn history(&self) -> Vec<Session> {
        self.store
            .lock()
            .await
            .history()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Run the image-analysis pipeline for an encoded image.
    ///
    /// Decodes the data URI, submits it to the classifier, and appends the
    /// result as an AI message: a diagnosis on success, the fallback text on
    /// any failure. Always terminates in exactly one appended message.
    ///
    /// The target session id is captured before the request is issued, so a
    /// session switch while the request is in flight cannot misroute the
    /// result.
    pub async fn analyze_image(&self, image: &str, note: Option<&str>) {
        let target = {
            let store = self.store.lock().await;
            store.current().map(|s| s.id().to_string())
        };

        let message = match self.run_analysis(image, note).await {
            Ok(diagnosis) => {
                debug!(disease = %diagnosis.disease, "analysis complete");
                Message::ai_diagnosis(diagnosis)
            }
            Err(e) => {
                warn!("image analysis failed: {e}");
                Message::ai_text(ANALYSIS_FALLBACK)
            }
        };

        let mut store = self.store.lock().await;
        match target {
            Some(id) => store.add_message_to(&id, message),
            None => store.add_message(message),
        };
    }

    async fn run_analysis(
        &self,
        image: &str,
        note: Option<&str>,
    ) -> Result<leafscan_domain::Diagnosis, AnalysisError> {
        let uri = DataUri::parse(image)?;
        let payload = ImagePayload::from_data_uri(&uri);
        Ok(self.classifier.classify(payload, note).await?)
    }

    /// Send a text-only chat turn.
    ///
    /// On success, appends the user message followed by the backend's reply
    /// to the current session and returns the reply. On failure nothing is
    /// appended and the error propagates.
    pub async fn send_text(&self, text: &str) -> Result<Message, SendError> {
        let reply = self.chat.send_text(text).await?;

        let mut store = self.store.lock().await;
        store.add_message(Message::user_text(text));
        store.add_message(reply.clone());
        Ok(reply)
    }

    /// Send an image chat turn (with optional accompanying text).
    pub async fn send_with_image(
        &self,
        image: &str,
        text: Option<&str>,
    ) -> Result<Message, SendError> {
        let uri = DataUri::parse(image)?;
        let payload = ImagePayload::from_data_uri(&uri);
        let reply = self.chat.send_image(payload, text).await?;

        let mut store = self.store.lock().await;
        store.add_message(Message::user_image(image, text.map(String::from)));
        store.add_message(reply.clone());
        Ok(reply)
    }

    /// Pull the user's session history from the backend into the local
    /// collection. Returns the number of sessions fetched.
    pub async fn sync_history(&self) -> Result<usize, GatewayError> {
        let sessions = self.chat.history().await?;
        let count = sessions.len();
        self.store.lock().await.absorb(sessions);
        debug!(count, "history synced");
        Ok(count)
    }

    /// Drop all local sessions. Called when the authenticated user changes.
    pub async fn reset(&self) {
        self.store.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leafscan_domain::{Diagnosis, Role};
    use tokio::sync::Notify;

    struct FixedClassifier {
        result: Result<Diagnosis, GatewayError>,
    }

    #[async_trait]
    impl ImageClassifier for FixedClassifier {
        async fn classify(
            &self,
            _image: ImagePayload,
            _note: Option<&str>,
        ) -> Result<Diagnosis, GatewayError> {
            self.result.clone()
        }
    }

    /// Classifier that parks until the test releases it, to exercise the
    /// in-flight-request window.
    struct GatedClassifier {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl ImageClassifier for GatedClassifier {
        async fn classify(
            &self,
            _image: ImagePayload,
            _note: Option<&str>,
        ) -> Result<Diagnosis, GatewayError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(Diagnosis::new("Early Blight", vec!["spots".into()], vec![]))
        }
    }

    struct FakeChat {
        reply: Result<Message, GatewayError>,
        history: Vec<Session>,
    }

    impl FakeChat {
        fn empty() -> Self {
            Self {
                reply: Err(GatewayError::Network("unused".into())),
                history: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for FakeChat {
        async fn send_text(&self, _message: &str) -> Result<Message, GatewayError> {
            self.reply.clone()
        }

        async fn send_image(
            &self,
            _image: ImagePayload,
            _message: Option<&str>,
        ) -> Result<Message, GatewayError> {
            self.reply.clone()
        }

        async fn history(&self) -> Result<Vec<Session>, GatewayError> {
            Ok(self.history.clone())
        }
    }

    fn manager_with_classifier(result: Result<Diagnosis, GatewayError>) -> ChatManager {
        ChatManager::new(
            Arc::new(FixedClassifier { result }),
            Arc::new(FakeChat::empty()),
        )
    }

    const PNG_URI: &str = "data:image/png;base64,AAAA";

    #[tokio::test]
    async fn analyze_success_appends_one_diagnosis_message() {
        let diagnosis = Diagnosis::new(
            "Early Blight",
            vec!["spots".to_string()],
            vec!["fungicide".to_string()],
        );
        let manager = manager_with_classifier(Ok(diagnosis));

        manager.add_message(Message::user_image(PNG_URI, None)).await;
        manager.analyze_image(PNG_URI, None).await;

        let session = manager.current_session().await.unwrap();
        assert_eq!(session.messages().len(), 2);
        let reply = &session.messages()[1];
        assert_eq!(reply.role(), Role::Ai);
        assert_eq!(reply.diagnosis().unwrap().disease, "Early Blight");
    }

    #[tokio::test]
    async fn analyze_failure_appends_one_fallback_message() {
        let manager =
            manager_with_classifier(Err(GatewayError::Network("connection refused".into())));

        manager.add_message(Message::user_image(PNG_URI, None)).await;
        manager.analyze_image(PNG_URI, None).await;

        let session = manager.current_session().await.unwrap();
        assert_eq!(session.messages().len(), 2);
        let reply = &session.messages()[1];
        assert_eq!(reply.role(), Role::Ai);
        assert!(reply.text().is_some());
        assert!(reply.diagnosis().is_none());
    }

    #[tokio::test]
    async fn malformed_data_uri_takes_the_fallback_path() {
        let diagnosis = Diagnosis::new("unreached", vec![], vec![]);
        let manager = manager_with_classifier(Ok(diagnosis));

        manager.analyze_image("not-a-data-uri", None).await;

        let session = manager.current_session().await.unwrap();
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].diagnosis().is_none());
        assert!(session.messages()[0].text().is_some());
    }

    #[tokio::test]
    async fn analyze_without_session_synthesizes_one() {
        let manager =
            manager_with_classifier(Ok(Diagnosis::new("Powdery Mildew", vec![], vec![])));

        manager.analyze_image(PNG_URI, None).await;

        assert_eq!(manager.history().await.len(), 1);
        let session = manager.current_session().await.unwrap();
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn in_flight_analysis_lands_in_the_originating_session() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let manager = Arc::new(ChatManager::new(
            Arc::new(GatedClassifier {
                started: started.clone(),
                release: release.clone(),
            }),
            Arc::new(FakeChat::empty()),
        ));

        let origin = manager.add_message(Message::user_image(PNG_URI, None)).await;

        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.analyze_image(PNG_URI, None).await })
        };
        started.notified().await;

        // Switch to another session while the request is pending
        manager.start_session().await;
        manager.add_message(Message::user_text("different topic")).await;

        release.notify_one();
        task.await.unwrap();

        let history = manager.history().await;
        let origin_session = history.iter().find(|s| s.id() == origin).unwrap();
        assert_eq!(origin_session.messages().len(), 2);
        assert!(origin_session.messages()[1].diagnosis().is_some());

        let other = history.iter().find(|s| s.id() != origin).unwrap();
        assert_eq!(other.messages().len(), 1);
    }

    #[tokio::test]
    async fn send_text_appends_user_then_reply() {
        let reply = Message::ai_text("It sounds like blight.");
        let manager = ChatManager::new(
            Arc::new(FixedClassifier {
                result: Err(GatewayError::Network("unused".into())),
            }),
            Arc::new(FakeChat {
                reply: Ok(reply),
                history: Vec::new(),
            }),
        );

        manager.send_text("hello").await.unwrap();

        let session = manager.current_session().await.unwrap();
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role(), Role::User);
        assert_eq!(session.messages()[0].text(), Some("hello"));
        assert_eq!(session.messages()[1].role(), Role::Ai);
    }

    #[tokio::test]
    async fn send_text_failure_appends_nothing() {
        let manager = ChatManager::new(
            Arc::new(FixedClassifier {
                result: Err(GatewayError::Network("unused".into())),
            }),
            Arc::new(FakeChat {
                reply: Err(GatewayError::Server("Message required".into())),
                history: Vec::new(),
            }),
        );

        let result = manager.send_text("hello").await;
        assert!(result.is_err());
        assert!(manager.current_session().await.is_none());
    }

    #[tokio::test]
    async fn reset_drops_local_sessions() {
        let manager =
            manager_with_classifier(Ok(Diagnosis::new("Powdery Mildew", vec![], vec![])));

        manager.add_message(Message::user_text("my tomatoes")).await;
        manager.start_session().await;
        manager.add_message(Message::user_text("my roses")).await;
        assert_eq!(manager.history().await.len(), 2);

        manager.reset().await;

        assert!(manager.history().await.is_empty());
        assert!(manager.current_session().await.is_none());
    }

    #[tokio::test]
    async fn sync_history_absorbs_backend_sessions() {
        let remote = Session::new();
        let manager = ChatManager::new(
            Arc::new(FixedClassifier {
                result: Err(GatewayError::Network("unused".into())),
            }),
            Arc::new(FakeChat {
                reply: Err(GatewayError::Network("unused".into())),
                history: vec![remote.clone()],
            }),
        );

        let count = manager.sync_history().await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(manager.history().await.len(), 1);
        assert_eq!(manager.history().await[0].id(), remote.id());
    }
}
