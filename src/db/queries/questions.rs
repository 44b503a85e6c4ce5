use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring match on the question text. SQLite only folds ASCII
/// case in `LOWER` and `LIKE`, so the comparison runs on Unicode-lowercased text here.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| matches_term(&q.question, &term))
        .collect())
}

fn matches_term(text: &str, lowercase_term: &str) -> bool {
    text.to_lowercase().contains(lowercase_term)
}

pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut conn = pool.acquire().await?;

    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(deleted)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.into(),
            answer: "answer".into(),
            category,
            difficulty: 2,
        }
    }

    #[test]
    fn matches_term_folds_unicode_case() {
        assert!(matches_term("Wer schrieb Über den Wolken?", "über"));
        assert!(matches_term("ÉCOLE normale", "école"));
        assert!(!matches_term("Wer schrieb Über den Wolken?", "unter"));
    }

    #[tokio::test]
    async fn create_then_fetch_and_delete() {
        let pool = in_memory().await.unwrap();
        let id = create_question(&pool, &new_question("Who are you?", 1))
            .await
            .unwrap();

        let stored = get_question_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.question, "Who are you?");
        assert_eq!(stored.category, 1);

        assert_eq!(delete_question(&pool, id).await.unwrap(), 1);
        assert!(get_question_by_id(&pool, id).await.unwrap().is_none());
        assert_eq!(delete_question(&pool, id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_category_violates_foreign_key() {
        let pool = in_memory().await.unwrap();
        assert!(create_question(&pool, &new_question("Orphan?", 999)).await.is_err());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_literal() {
        let pool = in_memory().await.unwrap();
        create_question(&pool, &new_question("What is the title of this book?", 2))
            .await
            .unwrap();
        create_question(&pool, &new_question("Is 100% a lot?", 1))
            .await
            .unwrap();

        assert_eq!(search_questions(&pool, "TITLE").await.unwrap().len(), 1);
        assert_eq!(search_questions(&pool, "%").await.unwrap().len(), 1);
        assert!(search_questions(&pool, "zebra").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_non_ascii_letters_in_any_case() {
        let pool = in_memory().await.unwrap();
        create_question(&pool, &new_question("Wer schrieb Über den Wolken?", 5))
            .await
            .unwrap();

        for term in ["Über", "über", "ÜBER DEN"] {
            assert_eq!(search_questions(&pool, term).await.unwrap().len(), 1, "{term}");
        }
    }

    #[tokio::test]
    async fn filters_by_category_in_id_order() {
        let pool = in_memory().await.unwrap();
        let a = create_question(&pool, &new_question("a", 3)).await.unwrap();
        create_question(&pool, &new_question("b", 4)).await.unwrap();
        let c = create_question(&pool, &new_question("c", 3)).await.unwrap();

        let ids: Vec<i64> = get_questions_for_category(&pool, 3)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, [a, c]);
    }
}
