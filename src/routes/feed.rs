//! Calendar feed endpoint

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/calendar.ics", get(calendar))
}

/// GET /calendar.ics - The ICS feed, served from cache when fresh
async fn calendar(State(state): State<AppState>) -> Result<Response, AppError> {
    let ics = state.feed().get_feed().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"calendar.ics\"",
            ),
        ],
        ics,
    )
        .into_response())
}
