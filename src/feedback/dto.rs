use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feedback::repo::Feedback;

/// Request body for submitting feedback. The caller supplies its own
/// `ownerId`; there is no session, so the field is trusted as-is.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub name: String,
    pub feedback: String,
    pub comment: Option<String>,
    pub owner_id: Uuid,
}

/// Request body for editing an entry. Only the owner may edit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    pub name: String,
    pub feedback: String,
    pub comment: Option<String>,
    pub requester_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFeedbackRequest {
    pub requester_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply: String,
    pub requester_id: Uuid,
}

/// Response for mutation endpoints: message plus the affected record.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
    pub data: Feedback,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_camel_case() {
        let req: CreateFeedbackRequest = serde_json::from_str(
            r#"{"name":"A","feedback":"great","comment":"ok","ownerId":"6f4a2f8e-6a2e-4b0a-9a41-0b9f3f0b2c11"}"#,
        )
        .unwrap();
        assert_eq!(req.feedback, "great");
        assert_eq!(req.comment.as_deref(), Some("ok"));
    }

    #[test]
    fn create_request_comment_is_optional() {
        let req: CreateFeedbackRequest = serde_json::from_str(
            r#"{"name":"A","feedback":"great","ownerId":"6f4a2f8e-6a2e-4b0a-9a41-0b9f3f0b2c11"}"#,
        )
        .unwrap();
        assert!(req.comment.is_none());
    }

    #[test]
    fn create_request_requires_owner_id() {
        let result = serde_json::from_str::<CreateFeedbackRequest>(
            r#"{"name":"A","feedback":"great"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reply_request_parses() {
        let req: ReplyRequest = serde_json::from_str(
            r#"{"reply":"thanks","requesterId":"6f4a2f8e-6a2e-4b0a-9a41-0b9f3f0b2c11"}"#,
        )
        .unwrap();
        assert_eq!(req.reply, "thanks");
    }
}
