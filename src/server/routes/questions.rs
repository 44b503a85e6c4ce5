use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category_map,
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResult},
        extractors::{ApiJson, ApiPath},
        pagination::{paginate, Page},
    },
};

#[derive(Deserialize)]
struct NewQuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    status: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    // length of this page, not the number of matches
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    status: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    status: bool,
    deleted: i64,
}

async fn list_questions(State(pool): State<SqlitePool>, page: Page) -> ApiResult<QuestionsPage> {
    let questions = get_all_questions(&pool).await?;
    let total_questions = questions.len();
    let questions = paginate(page, questions);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        status: true,
        questions,
        total_questions,
        categories: get_category_map(&pool).await?,
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<NewQuestionBody>,
) -> ApiResult<Created> {
    let new = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new).await?;
    tracing::info!(id, category = new.category, "Question created");

    Ok(Json(Created {
        status: true,
        created: id,
    }))
}

// every failure on this path, including a missing question, is reported as
// unprocessable
async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Deleted> {
    match questions::delete_question(&pool, id).await {
        Ok(0) => {
            tracing::debug!(id, "Question to delete does not exist");
            return Err(ApiError::Unprocessable);
        }
        Ok(_) => {}
        Err(error) => {
            tracing::warn!(id, "Failed to delete question: {error}");
            return Err(ApiError::Unprocessable);
        }
    }
    tracing::info!(id, "Question deleted");

    Ok(Json(Deleted {
        status: true,
        deleted: id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    page: Page,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResult<SearchResults> {
    let questions = paginate(page, search_questions(&pool, &body.search_term).await?);
    Ok(Json(SearchResults {
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
}
