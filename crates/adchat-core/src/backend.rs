//! AssistantBackend trait definition.
//!
//! The remote service that answers questions, persists the log and enforces
//! quotas. Follows the RPITIT pattern so implementations can be plain
//! `async fn`s.

use adchat_types::ask::AskReply;
use adchat_types::error::BackendError;
use adchat_types::subject::SubjectId;

/// Port to the remote assistant service.
///
/// Implementations live in adchat-infra (e.g., `HttpAssistantBackend`).
pub trait AssistantBackend: Send + Sync {
    /// Fetch the persisted log for a subject as raw JSON.
    ///
    /// The payload is classified by the log adapter; implementations must not
    /// interpret it beyond decoding JSON.
    fn fetch_history(
        &self,
        subject: &SubjectId,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, BackendError>> + Send;

    /// Ask a question about a subject. An empty question requests the
    /// opening message and initial suggestions.
    fn ask(
        &self,
        subject: &SubjectId,
        question: &str,
    ) -> impl std::future::Future<Output = Result<AskReply, BackendError>> + Send;
}
