use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_category_filter,
        error::ApiResult,
        extractors::ApiJson,
        quiz::next_question,
    },
    settings::QuizSelection,
    telemetry::QUIZ_QUESTIONS_SERVED,
};

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: HashSet<i64>,
    #[serde(deserialize_with = "deserialize_category_filter")]
    quiz_category: Option<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    status: bool,
    question: Option<Question>,
}

async fn play(
    State(pool): State<SqlitePool>,
    State(selection): State<QuizSelection>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResult<QuizResponse> {
    let candidates = match body.quiz_category {
        Some(category) => get_questions_for_category(&pool, category).await?,
        None => get_all_questions(&pool).await?,
    };
    let question = next_question(
        candidates,
        &body.previous_questions,
        selection,
        &mut rand::thread_rng(),
    );

    match &question {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[question.category.to_string().as_str()])
                .inc();
            tracing::debug!(id = question.id, "Serving quiz question");
        }
        None => tracing::debug!(
            asked = body.previous_questions.len(),
            "No unseen quiz questions left"
        ),
    }

    Ok(Json(QuizResponse {
        status: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(play))
}
