//! Grace (like) and comment vote state with optimistic updates
//!
//! Both follow the same cycle: `begin` applies the predicted outcome and keeps a
//! snapshot, then exactly one of `confirm` (server answer) or `revert` (failure).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{BuildId, CommentId};

// ============================================================================
// Grace
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GraceSnapshot {
    liked: bool,
    total_likes: u64,
}

/// The grace toggle of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraceButton {
    build_id: BuildId,
    like_url: Option<String>,
    liked: bool,
    total_likes: u64,
    pending: Option<GraceSnapshot>,
}

impl GraceButton {
    pub fn new(build_id: BuildId, liked: bool, total_likes: u64) -> Self {
        Self {
            build_id,
            like_url: None,
            liked,
            total_likes,
            pending: None,
        }
    }

    /// Use an endpoint rendered into the page instead of the default route.
    pub fn with_like_url(mut self, url: impl Into<String>) -> Self {
        self.like_url = Some(url.into());
        self
    }

    pub fn build_id(&self) -> BuildId {
        self.build_id
    }

    pub fn like_url(&self) -> Option<&str> {
        self.like_url.as_deref()
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn total_likes(&self) -> u64 {
        self.total_likes
    }

    /// The button is disabled while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn label(&self) -> &'static str {
        if self.liked {
            "⚡ Remove Grace"
        } else {
            "⚡ Grace Build"
        }
    }

    pub fn css_class(&self) -> &'static str {
        if self.liked {
            "btn grace-btn btn-warning"
        } else {
            "btn grace-btn btn-outline-warning"
        }
    }

    /// Flip the toggle ahead of the server answer.
    pub fn begin(&mut self) -> Result<(), DomainError> {
        if self.pending.is_some() {
            return Err(DomainError::invalid_state_transition(
                "Grace request already in flight",
            ));
        }
        self.pending = Some(GraceSnapshot {
            liked: self.liked,
            total_likes: self.total_likes,
        });
        self.liked = !self.liked;
        self.total_likes = if self.liked {
            self.total_likes + 1
        } else {
            self.total_likes.saturating_sub(1)
        };
        Ok(())
    }

    /// Adopt the server's view; missing fields keep the predicted values.
    pub fn confirm(&mut self, is_liked: Option<bool>, total_likes: Option<u64>) {
        if let Some(liked) = is_liked {
            self.liked = liked;
        }
        if let Some(total) = total_likes {
            self.total_likes = total;
        }
        self.pending = None;
    }

    /// Restore the state from before `begin`.
    pub fn revert(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            self.liked = snapshot.liked;
            self.total_likes = snapshot.total_likes;
        }
    }
}

// ============================================================================
// Comment votes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            other => Err(DomainError::parse(format!("Invalid vote type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VoteSnapshot {
    upvotes: u64,
    downvotes: u64,
    score: i64,
    user_vote: Option<VoteType>,
}

/// Vote counters of one comment as seen by the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentVotes {
    comment_id: CommentId,
    upvotes: u64,
    downvotes: u64,
    score: i64,
    user_vote: Option<VoteType>,
    pending: Option<VoteSnapshot>,
}

impl CommentVotes {
    pub fn new(
        comment_id: CommentId,
        upvotes: u64,
        downvotes: u64,
        user_vote: Option<VoteType>,
    ) -> Self {
        Self {
            comment_id,
            upvotes,
            downvotes,
            score: upvotes as i64 - downvotes as i64,
            user_vote,
            pending: None,
        }
    }

    pub fn comment_id(&self) -> CommentId {
        self.comment_id
    }

    pub fn upvotes(&self) -> u64 {
        self.upvotes
    }

    pub fn downvotes(&self) -> u64 {
        self.downvotes
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn user_vote(&self) -> Option<VoteType> {
        self.user_vote
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn upvote_class(&self) -> &'static str {
        if self.user_vote == Some(VoteType::Upvote) {
            "btn btn-sm upvote-btn btn-success"
        } else {
            "btn btn-sm upvote-btn btn-outline-success"
        }
    }

    pub fn downvote_class(&self) -> &'static str {
        if self.user_vote == Some(VoteType::Downvote) {
            "btn btn-sm downvote-btn btn-danger"
        } else {
            "btn btn-sm downvote-btn btn-outline-danger"
        }
    }

    /// Apply the server's voting rule ahead of its answer.
    ///
    /// Repeating the current vote removes it, the other vote replaces it, and
    /// with no current vote the new one is added.
    pub fn begin(&mut self, vote: VoteType) -> Result<(), DomainError> {
        if self.pending.is_some() {
            return Err(DomainError::invalid_state_transition(
                "Vote request already in flight",
            ));
        }
        self.pending = Some(VoteSnapshot {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            score: self.score,
            user_vote: self.user_vote,
        });

        if let Some(previous) = self.user_vote {
            self.withdraw(previous);
        }
        if self.user_vote_after(vote).is_some() {
            match vote {
                VoteType::Upvote => self.upvotes += 1,
                VoteType::Downvote => self.downvotes += 1,
            }
        }
        self.user_vote = self.user_vote_after(vote);
        self.score = self.upvotes as i64 - self.downvotes as i64;
        Ok(())
    }

    /// Adopt the server's counters; missing fields keep the predicted values.
    pub fn confirm(
        &mut self,
        upvotes: Option<u64>,
        downvotes: Option<u64>,
        score: Option<i64>,
        user_vote: Option<Option<VoteType>>,
    ) {
        if let Some(up) = upvotes {
            self.upvotes = up;
        }
        if let Some(down) = downvotes {
            self.downvotes = down;
        }
        if let Some(vote) = user_vote {
            self.user_vote = vote;
        }
        self.score = score.unwrap_or(self.upvotes as i64 - self.downvotes as i64);
        self.pending = None;
    }

    pub fn revert(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            self.upvotes = snapshot.upvotes;
            self.downvotes = snapshot.downvotes;
            self.score = snapshot.score;
            self.user_vote = snapshot.user_vote;
        }
    }

    fn withdraw(&mut self, vote: VoteType) {
        match vote {
            VoteType::Upvote => self.upvotes = self.upvotes.saturating_sub(1),
            VoteType::Downvote => self.downvotes = self.downvotes.saturating_sub(1),
        }
    }

    /// The vote the user holds once `vote` is cast, judged from the snapshot.
    fn user_vote_after(&self, vote: VoteType) -> Option<VoteType> {
        let before = self.pending.and_then(|s| s.user_vote);
        if before == Some(vote) {
            None
        } else {
            Some(vote)
        }
    }
}
