//! Repository for the `orders` table.

use eventworks_core::types::OrderId;
use sqlx::PgPool;

use crate::models::order::{NewOrder, Order, UpdateOrderReview};

/// Column list for `orders` queries.
const COLUMNS: &str = "\
    id, name, email, phone, request_type, budget_range, deadline, \
    meeting, details, meeting_unavailable, status, admin_memo, \
    abuse_score, scorer_hostname, scorer_action, created_at, updated_at";

/// Provides persistence operations for orders.
///
/// Intake appends; the admin surface reads and edits review fields. No
/// method deletes a row.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the full row. The store assigns id,
    /// status, memo, and both timestamps.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders \
                (name, email, phone, request_type, budget_range, deadline, \
                 meeting, details, meeting_unavailable, \
                 abuse_score, scorer_hostname, scorer_action) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.submission.name)
            .bind(&input.submission.email)
            .bind(&input.submission.phone)
            .bind(&input.submission.request_type)
            .bind(&input.submission.budget_range)
            .bind(&input.submission.deadline)
            .bind(&input.submission.meeting)
            .bind(&input.submission.details)
            .bind(&input.submission.meeting_unavailable)
            .bind(input.abuse_score)
            .bind(&input.scorer_hostname)
            .bind(&input.scorer_action)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: OrderId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List orders with an optional status filter.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM orders {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Order>(&query);

        if let Some(s) = status {
            q = q.bind(s);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Overwrite the review fields (status and memo) of an order,
    /// store-assigning `updated_at`. Returns the updated row if found.
    pub async fn update_review(
        pool: &PgPool,
        id: OrderId,
        input: &UpdateOrderReview,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $1, admin_memo = $2, updated_at = now() \
             WHERE id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.status)
            .bind(&input.admin_memo)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all orders.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
    }
}
