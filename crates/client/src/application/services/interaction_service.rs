//! Interaction Service - Grace (like) toggles and comment votes
//!
//! Both interactions update the UI optimistically, post to the site and then
//! either adopt the server's numbers or roll back. Failures are shown to the
//! user once and never retried.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use erbuilds_domain::value_objects::{CSRF_FORM_FIELD, CSRF_HEADER};
use erbuilds_domain::{CommentVotes, CsrfSource, GraceButton, VoteType};
use erbuilds_shared::{like_path, vote_path, LikeResponse, VoteResponse};

use crate::application::error::InteractionError;
use crate::ports::outbound::{ApiError, FormPost, NotifierPort, SiteApiPort};

pub const MISSING_TOKEN_ALERT: &str = "Security token not found. Please refresh the page.";
pub const GRACE_SERVER_ERROR_ALERT: &str = "Failed to update Grace. Server error.";
pub const VOTE_FAILED_ALERT: &str = "Failed to register vote. Please try again.";

#[derive(Clone)]
pub struct InteractionService {
    api: Arc<dyn SiteApiPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl InteractionService {
    pub fn new(api: Arc<dyn SiteApiPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self { api, notifier }
    }

    /// Toggle grace on a build.
    pub async fn toggle_grace(
        &self,
        button: &mut GraceButton,
        csrf: &CsrfSource,
    ) -> Result<(), InteractionError> {
        let token = self.require_token(csrf)?;
        button.begin()?;

        let path = button
            .like_url()
            .map(str::to_string)
            .unwrap_or_else(|| like_path(button.build_id()));
        let request = FormPost::new(path).field(CSRF_FORM_FIELD, token);

        let outcome = self.post::<LikeResponse>(request).await;
        match outcome {
            Ok(response) if response.success => {
                button.confirm(response.is_liked, response.total_likes);
                tracing::info!(
                    build_id = %button.build_id(),
                    liked = button.is_liked(),
                    total = button.total_likes(),
                    "Grace updated"
                );
                Ok(())
            }
            Ok(response) => {
                button.revert();
                tracing::warn!(build_id = %button.build_id(), error = ?response.error, "Grace rejected");
                self.notifier.alert(GRACE_SERVER_ERROR_ALERT);
                Err(InteractionError::Rejected(
                    response.error.unwrap_or_else(|| "success=false".to_string()),
                ))
            }
            Err(e) => {
                button.revert();
                tracing::error!(build_id = %button.build_id(), error = %e, "Grace request failed");
                self.notifier
                    .alert(&format!("Failed to update Grace: {}. Please try again.", e));
                Err(e.into())
            }
        }
    }

    /// Cast, switch or withdraw a vote on a comment.
    pub async fn cast_vote(
        &self,
        votes: &mut CommentVotes,
        vote: VoteType,
        csrf: &CsrfSource,
    ) -> Result<(), InteractionError> {
        let token = self.require_token(csrf)?;
        votes.begin(vote)?;

        let request = FormPost::new(vote_path(votes.comment_id(), vote))
            .field(CSRF_FORM_FIELD, token.clone())
            .header(CSRF_HEADER, token);

        let outcome = self.post::<VoteResponse>(request).await;
        match outcome {
            Ok(response) if response.success => {
                votes.confirm(
                    response.upvotes,
                    response.downvotes,
                    response.score,
                    Some(response.user_vote),
                );
                tracing::info!(
                    comment_id = %votes.comment_id(),
                    score = votes.score(),
                    "Vote registered"
                );
                Ok(())
            }
            Ok(response) => {
                votes.revert();
                tracing::warn!(comment_id = %votes.comment_id(), error = ?response.error, "Vote rejected");
                self.notifier.alert(VOTE_FAILED_ALERT);
                Err(InteractionError::Rejected(
                    response.error.unwrap_or_else(|| "success=false".to_string()),
                ))
            }
            Err(e) => {
                votes.revert();
                tracing::error!(comment_id = %votes.comment_id(), error = %e, "Vote request failed");
                self.notifier.alert(VOTE_FAILED_ALERT);
                Err(e.into())
            }
        }
    }

    fn require_token(&self, csrf: &CsrfSource) -> Result<String, InteractionError> {
        csrf.resolve().ok_or_else(|| {
            tracing::error!("CSRF token not found");
            self.notifier.alert(MISSING_TOKEN_ALERT);
            InteractionError::MissingCsrfToken
        })
    }

    async fn post<T: DeserializeOwned>(&self, request: FormPost) -> Result<T, ApiError> {
        let body: Value = self.api.post_form(request).await?;
        serde_json::from_value(body).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}
