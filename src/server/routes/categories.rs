use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_category, get_category_map},
            questions::get_questions_for_category,
        },
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResult},
        extractors::ApiPath,
        pagination::{paginate, Page},
    },
};

#[derive(Serialize)]
struct CategoriesResponse {
    status: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    questions: Vec<Question>,
    // length of this page, not of the whole category
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    let categories = get_category_map(&pool).await?;
    Ok(Json(CategoriesResponse {
        status: true,
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    page: Page,
) -> ApiResult<CategoryQuestionsResponse> {
    let category = get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;
    let questions = paginate(page, get_questions_for_category(&pool, id).await?);
    Ok(Json(CategoryQuestionsResponse {
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
