use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Review, ReviewWithAuthor},
    error::{AppError, Result},
    repository::ReviewRepository,
};

#[derive(FromRow)]
struct ReviewRow {
    id: String,
    parking_space_id: String,
    user_id: String,
    rating: i64,
    comment: Option<String>,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ReviewAuthorRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    name: String,
}

pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: ReviewRow) -> Result<Review> {
        Ok(Review {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            parking_space_id: Uuid::parse_str(&row.parking_space_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            rating: row.rating,
            comment: row.comment,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn create(&self, review: Review) -> Result<Review> {
        let id_str = review.id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO reviews (id, parking_space_id, user_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(review.parking_space_id.to_string())
        .bind(review.user_id.to_string())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, parking_space_id, user_id, rating, comment, created_at
            FROM reviews
            WHERE id = ?
            "#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_review(r),
            None => Err(AppError::Database(
                "Failed to retrieve created review".to_string(),
            )),
        }
    }

    async fn list_for_space(&self, space_id: Uuid) -> Result<Vec<ReviewWithAuthor>> {
        let space_id_str = space_id.to_string();
        let rows = sqlx::query_as::<_, ReviewAuthorRow>(
            r#"
            SELECT r.id, r.parking_space_id, r.user_id, r.rating, r.comment,
                   r.created_at, u.name
            FROM reviews r
            JOIN users u ON r.user_id = u.id
            WHERE r.parking_space_id = ?
            "#,
        )
        .bind(space_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|r| {
                Ok(ReviewWithAuthor {
                    review: Self::row_to_review(r.review)?,
                    name: r.name,
                })
            })
            .collect()
    }
}
