//! Survey service — five-question point-accrual survey sessions.
//!
//! DESIGN
//! ======
//! Each session walks the fixed question list in order. Accepting a question
//! earns its points and records the question's field as `yes`; skipping
//! records nothing. A session completes when the points goal is reached or
//! the last question is passed. Sessions are session-scoped: they live in
//! memory and vanish on restart.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

/// Points needed to finish early.
pub const POINT_GOAL: u32 = 40;

/// Live sessions kept before completed and stale ones are pruned.
pub const MAX_SESSIONS: usize = 10_000;

/// Age after which an unfinished session counts as abandoned.
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SurveyError {
    #[error("survey session not found: {0}")]
    NotFound(Uuid),
    #[error("survey session already complete: {0}")]
    AlreadyComplete(Uuid),
    #[error("too many active survey sessions")]
    AtCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: &'static str,
    pub value: u32,
    /// Form field the answer is submitted under.
    pub field: &'static str,
}

pub static QUESTIONS: [Question; 5] = [
    Question { text: "Do you shop online?", value: 2, field: "f12345" },
    Question { text: "Are taxes important to you?", value: 4, field: "f54321" },
    Question { text: "Do you own a pet?", value: 2, field: "f78945" },
    Question { text: "I say, is that a hat?", value: 5, field: "f98745" },
    Question { text: "Leaving so soon?", value: 2, field: "f65412" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    GoalReached,
    AllAnswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurveyStatus {
    InProgress,
    Completed { reason: CompletionReason },
}

/// One respondent's progress through the survey.
#[derive(Debug, Clone)]
pub struct SurveySession {
    pub id: Uuid,
    pub score: u32,
    /// Points still needed for the goal, never below zero.
    pub remaining: u32,
    pub position: usize,
    pub answers: BTreeMap<&'static str, &'static str>,
    pub status: SurveyStatus,
    pub started_at: Instant,
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySnapshot {
    pub id: Uuid,
    pub score: u32,
    pub remaining: u32,
    pub position: usize,
    pub total: usize,
    pub question: Option<Question>,
    pub answers: BTreeMap<&'static str, &'static str>,
    pub status: SurveyStatus,
}

// =============================================================================
// SESSION LOGIC
// =============================================================================

impl SurveySession {
    /// Start a session, optionally carrying over points from a prior visit.
    #[must_use]
    pub fn new(id: Uuid, carried_score: u32) -> Self {
        let remaining = POINT_GOAL.saturating_sub(carried_score);
        let status = if remaining == 0 {
            SurveyStatus::Completed { reason: CompletionReason::GoalReached }
        } else {
            SurveyStatus::InProgress
        };
        Self {
            id,
            score: carried_score,
            remaining,
            position: 0,
            answers: BTreeMap::new(),
            status,
            started_at: Instant::now(),
        }
    }

    /// Finished, or unfinished and older than [`SESSION_TTL`] at `now`.
    #[must_use]
    pub fn is_prunable(&self, now: Instant) -> bool {
        self.status != SurveyStatus::InProgress || now.saturating_duration_since(self.started_at) >= SESSION_TTL
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.status {
            SurveyStatus::InProgress => QUESTIONS.get(self.position),
            SurveyStatus::Completed { .. } => None,
        }
    }

    /// Answer the current question. Returns the points earned.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyComplete` once the session has finished.
    pub fn answer(&mut self, accept: bool) -> Result<u32, SurveyError> {
        let Some(question) = self.current_question() else {
            return Err(SurveyError::AlreadyComplete(self.id));
        };

        let earned = if accept { question.value } else { 0 };
        if accept {
            self.score = self.score.saturating_add(question.value);
            self.remaining = self.remaining.saturating_sub(question.value);
            self.answers.insert(question.field, "yes");
        }

        if self.remaining == 0 {
            self.status = SurveyStatus::Completed { reason: CompletionReason::GoalReached };
        } else {
            self.position += 1;
            if self.position >= QUESTIONS.len() {
                self.status = SurveyStatus::Completed { reason: CompletionReason::AllAnswered };
            }
        }
        Ok(earned)
    }

    #[must_use]
    pub fn snapshot(&self) -> SurveySnapshot {
        SurveySnapshot {
            id: self.id,
            score: self.score,
            remaining: self.remaining,
            position: self.position,
            total: QUESTIONS.len(),
            question: self.current_question().copied(),
            answers: self.answers.clone(),
            status: self.status,
        }
    }
}

// =============================================================================
// STORE OPERATIONS
// =============================================================================

/// Create a session and return its snapshot.
///
/// # Errors
///
/// Returns `AtCapacity` when the store is full of fresh in-progress sessions.
pub async fn start_survey(state: &AppState, carried_score: u32) -> Result<SurveySnapshot, SurveyError> {
    start_survey_at(state, carried_score, Instant::now()).await
}

async fn start_survey_at(state: &AppState, carried_score: u32, now: Instant) -> Result<SurveySnapshot, SurveyError> {
    let mut surveys = state.surveys.write().await;
    if surveys.len() >= MAX_SESSIONS {
        let pruned = prune_sessions(&mut surveys, now);
        info!(pruned, "survey sessions pruned");
        if surveys.len() >= MAX_SESSIONS {
            return Err(SurveyError::AtCapacity);
        }
    }

    let session = SurveySession::new(Uuid::new_v4(), carried_score);
    let snapshot = session.snapshot();
    surveys.insert(session.id, session);
    info!(survey_id = %snapshot.id, carried_score, "survey started");
    Ok(snapshot)
}

/// Drop finished and abandoned sessions. Returns how many were removed.
pub fn prune_sessions(surveys: &mut HashMap<Uuid, SurveySession>, now: Instant) -> usize {
    let before = surveys.len();
    surveys.retain(|_, s| !s.is_prunable(now));
    before - surveys.len()
}

/// Fetch a session snapshot.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id.
pub async fn get_survey(state: &AppState, id: Uuid) -> Result<SurveySnapshot, SurveyError> {
    let surveys = state.surveys.read().await;
    surveys.get(&id).map(SurveySession::snapshot).ok_or(SurveyError::NotFound(id))
}

/// Answer the current question of a session.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id and `AlreadyComplete` for a finished
/// session.
pub async fn answer_survey(state: &AppState, id: Uuid, accept: bool) -> Result<(u32, SurveySnapshot), SurveyError> {
    let mut surveys = state.surveys.write().await;
    let session = surveys.get_mut(&id).ok_or(SurveyError::NotFound(id))?;
    let earned = session.answer(accept)?;
    if let SurveyStatus::Completed { reason } = session.status {
        info!(survey_id = %id, score = session.score, ?reason, "survey complete");
    }
    Ok((earned, session.snapshot()))
}

#[cfg(test)]
#[path = "survey_test.rs"]
mod tests;
