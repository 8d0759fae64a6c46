//! Feedback status transitions and operator-note permissions.
//!
//! This is the one place these rules are written down. The REST layer and the CLI both ask this
//! module rather than keeping their own copies.
//!
//! Feedback moves `new → investigating → resolved → closed`, may be reopened from `resolved` to
//! `investigating`, sent back from `investigating` to `new`, and closed from any open state.
//! `closed` is terminal. Skipping investigation (`new → resolved`) is not allowed.

use crate::{CoreError, CoreResult};
use qform_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    New,
    Investigating,
    Resolved,
    Closed,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 4] = [
        Self::New,
        Self::Investigating,
        Self::Resolved,
        Self::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Parses a status from its string representation (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the string does not name a status.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "investigating" => Ok(Self::Investigating),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(CoreError::InvalidInput(format!(
                "Invalid feedback status: {s}"
            ))),
        }
    }

    /// Statuses reachable in one step from this one.
    pub fn next(&self) -> &'static [FeedbackStatus] {
        use FeedbackStatus::*;
        match self {
            New => &[Investigating, Closed],
            Investigating => &[Resolved, New, Closed],
            Resolved => &[Investigating, Closed],
            Closed => &[],
        }
    }

    pub fn can_transition_to(&self, to: FeedbackStatus) -> bool {
        self.next().contains(&to)
    }

    /// Validate a status change.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `to` is not reachable from `self`, including
    /// when `to == self`.
    pub fn transition(self, to: FeedbackStatus) -> CoreResult<FeedbackStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(CoreError::InvalidTransition { from: self, to })
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_empty()
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard role of an operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorRole {
    Operator,
    Admin,
}

impl OperatorRole {
    /// Parses a role from its string representation (case-insensitive).
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "operator" => Ok(Self::Operator),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::InvalidInput(format!("Invalid operator role: {s}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    Edit,
    Delete,
}

impl NoteAction {
    /// Parses an action from its string representation (case-insensitive).
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(CoreError::InvalidInput(format!("Invalid note action: {s}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Check whether `actor` may perform `action` on a note written by `note_author`.
///
/// Authors may edit and delete their own notes. Admins may additionally delete anyone's note,
/// but nobody edits another operator's words.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if `actor` is blank, and [`CoreError::Forbidden`] when
/// the action is not permitted. A blank note author matches nobody.
pub fn authorize_note_action(
    actor: &str,
    role: OperatorRole,
    note_author: &str,
    action: NoteAction,
) -> CoreResult<()> {
    let actor = NonEmptyText::new(actor)
        .map_err(|e| CoreError::InvalidInput(format!("note actor: {e}")))?;
    let is_author = actor.as_str() == note_author.trim();
    let allowed = match action {
        NoteAction::Edit => is_author,
        NoteAction::Delete => is_author || role == OperatorRole::Admin,
    };

    if allowed {
        Ok(())
    } else {
        tracing::warn!(
            "denied note {} by {actor} on note written by {note_author}",
            action.as_str()
        );
        Err(CoreError::Forbidden(format!(
            "{actor} may not {} a note written by {note_author}",
            action.as_str()
        )))
    }
}
