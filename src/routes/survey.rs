//! Survey routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::survey::{self, SurveyError, SurveySnapshot};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StartSurveyBody {
    /// Points carried over from an earlier visit.
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    pub accept: bool,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub earned: u32,
    #[serde(flatten)]
    pub survey: SurveySnapshot,
}

pub(crate) fn survey_error_to_status(err: SurveyError) -> StatusCode {
    match err {
        SurveyError::NotFound(_) => StatusCode::NOT_FOUND,
        SurveyError::AlreadyComplete(_) => StatusCode::CONFLICT,
        SurveyError::AtCapacity => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// `POST /api/survey` — start a session. The body is optional.
pub async fn start(
    State(state): State<AppState>,
    body: Option<Json<StartSurveyBody>>,
) -> Result<(StatusCode, Json<SurveySnapshot>), StatusCode> {
    let carried = body.map_or(0, |Json(b)| b.score);
    let snapshot = survey::start_survey(&state, carried).await.map_err(survey_error_to_status)?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// `GET /api/survey/:id` — current session snapshot.
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SurveySnapshot>, StatusCode> {
    survey::get_survey(&state, id).await.map(Json).map_err(survey_error_to_status)
}

/// `POST /api/survey/:id/answer` — accept or skip the current question.
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AnswerBody>,
) -> Result<Json<AnswerResponse>, StatusCode> {
    let (earned, survey) = survey::answer_survey(&state, id, body.accept)
        .await
        .map_err(survey_error_to_status)?;
    Ok(Json(AnswerResponse { earned, survey }))
}

#[cfg(test)]
#[path = "survey_test.rs"]
mod tests;
