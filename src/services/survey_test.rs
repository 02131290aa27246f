use super::*;
use crate::state::test_helpers::test_site;

fn fresh() -> SurveySession {
    SurveySession::new(Uuid::new_v4(), 0)
}

// =============================================================================
// SESSION LOGIC
// =============================================================================

#[test]
fn new_session_starts_at_first_question() {
    let s = fresh();
    assert_eq!(s.score, 0);
    assert_eq!(s.remaining, POINT_GOAL);
    assert_eq!(s.status, SurveyStatus::InProgress);
    assert_eq!(s.current_question().map(|q| q.field), Some("f12345"));
}

#[test]
fn accepting_earns_points_and_records_field() {
    let mut s = fresh();
    let earned = s.answer(true).unwrap();
    assert_eq!(earned, 2);
    assert_eq!(s.score, 2);
    assert_eq!(s.remaining, POINT_GOAL - 2);
    assert_eq!(s.answers.get("f12345"), Some(&"yes"));
    assert_eq!(s.current_question().map(|q| q.field), Some("f54321"));
}

#[test]
fn skipping_records_nothing_and_advances() {
    let mut s = fresh();
    assert_eq!(s.answer(false).unwrap(), 0);
    assert_eq!(s.score, 0);
    assert!(s.answers.is_empty());
    assert_eq!(s.position, 1);
}

#[test]
fn passing_last_question_completes() {
    let mut s = fresh();
    for _ in 0..QUESTIONS.len() {
        s.answer(true).unwrap();
    }
    assert_eq!(s.score, 15);
    assert_eq!(s.remaining, POINT_GOAL - 15);
    assert_eq!(s.status, SurveyStatus::Completed { reason: CompletionReason::AllAnswered });
    assert_eq!(s.answers.len(), QUESTIONS.len());
    assert!(s.current_question().is_none());
}

#[test]
fn reaching_goal_completes_early() {
    let mut s = SurveySession::new(Uuid::new_v4(), 36);
    assert_eq!(s.remaining, 4);
    s.answer(true).unwrap();
    assert_eq!(s.remaining, 2);
    s.answer(true).unwrap();
    assert_eq!(s.score, 42);
    assert_eq!(s.remaining, 0);
    assert_eq!(s.status, SurveyStatus::Completed { reason: CompletionReason::GoalReached });
}

#[test]
fn remaining_never_goes_below_zero() {
    let mut s = SurveySession::new(Uuid::new_v4(), 39);
    s.answer(true).unwrap();
    assert_eq!(s.score, 41);
    assert_eq!(s.remaining, 0);
}

#[test]
fn carried_score_at_goal_starts_complete() {
    let s = SurveySession::new(Uuid::new_v4(), 50);
    assert_eq!(s.remaining, 0);
    assert!(s.current_question().is_none());
}

#[test]
fn answering_completed_session_fails() {
    let mut s = fresh();
    for _ in 0..QUESTIONS.len() {
        s.answer(false).unwrap();
    }
    assert_eq!(s.answer(true), Err(SurveyError::AlreadyComplete(s.id)));
}

#[test]
fn snapshot_serializes_status_tag() {
    let mut s = fresh();
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["status"]["state"], "in_progress");
    assert_eq!(json["question"]["text"], "Do you shop online?");
    assert_eq!(json["total"], 5);

    for _ in 0..QUESTIONS.len() {
        s.answer(false).unwrap();
    }
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["status"]["state"], "completed");
    assert_eq!(json["status"]["reason"], "all_answered");
    assert!(json["question"].is_null());
}

// =============================================================================
// STORE OPERATIONS
// =============================================================================

#[tokio::test]
async fn start_get_and_answer_round_trip_through_store() {
    let state = AppState::new(test_site());
    let started = start_survey(&state, 0).await.unwrap();
    assert_eq!(started.position, 0);

    let (earned, after) = answer_survey(&state, started.id, true).await.unwrap();
    assert_eq!(earned, 2);
    assert_eq!(after.score, 2);

    let fetched = get_survey(&state, started.id).await.unwrap();
    assert_eq!(fetched.position, 1);
    assert_eq!(fetched.score, 2);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let state = AppState::new(test_site());
    let id = Uuid::new_v4();
    assert_eq!(get_survey(&state, id).await.unwrap_err(), SurveyError::NotFound(id));
    assert_eq!(answer_survey(&state, id, true).await.unwrap_err(), SurveyError::NotFound(id));
}

#[tokio::test]
async fn full_store_prunes_completed_sessions() {
    let state = AppState::new(test_site());
    {
        let mut surveys = state.surveys.write().await;
        for _ in 0..MAX_SESSIONS {
            let s = SurveySession::new(Uuid::new_v4(), POINT_GOAL);
            surveys.insert(s.id, s);
        }
    }
    let started = start_survey(&state, 0).await.unwrap();
    let surveys = state.surveys.read().await;
    assert_eq!(surveys.len(), 1);
    assert!(surveys.contains_key(&started.id));
}

#[tokio::test]
async fn full_store_of_active_sessions_rejects() {
    let state = AppState::new(test_site());
    {
        let mut surveys = state.surveys.write().await;
        for _ in 0..MAX_SESSIONS {
            let s = fresh();
            surveys.insert(s.id, s);
        }
    }
    assert_eq!(start_survey(&state, 0).await.unwrap_err(), SurveyError::AtCapacity);
}

#[tokio::test]
async fn abandoned_sessions_expire_when_store_is_full() {
    let state = AppState::new(test_site());
    {
        let mut surveys = state.surveys.write().await;
        for _ in 0..MAX_SESSIONS {
            let s = fresh();
            surveys.insert(s.id, s);
        }
    }
    let later = Instant::now() + SESSION_TTL + Duration::from_secs(1);
    let started = start_survey_at(&state, 0, later).await.unwrap();
    let surveys = state.surveys.read().await;
    assert_eq!(surveys.len(), 1);
    assert!(surveys.contains_key(&started.id));
}

#[test]
fn prune_keeps_fresh_unfinished_sessions() {
    let mut surveys = HashMap::new();
    let active = fresh();
    let done = SurveySession::new(Uuid::new_v4(), POINT_GOAL);
    let active_id = active.id;
    surveys.insert(active.id, active);
    surveys.insert(done.id, done);

    assert_eq!(prune_sessions(&mut surveys, Instant::now()), 1);
    assert!(surveys.contains_key(&active_id));

    let expired = surveys[&active_id].started_at + SESSION_TTL;
    assert_eq!(prune_sessions(&mut surveys, expired), 1);
    assert!(surveys.is_empty());
}
