use std::collections::HashMap;
use crate::domain::models::quote::{Quote, QuoteItem, QuoteUpdate};
use crate::domain::ports::QuoteRepository;
use crate::error::AppError;
use crate::infra::db::finish;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

const QUOTE_COLUMNS: &str =
    "id, client_id, client_name, payment_terms, discount, status, expiration_date, notes, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, quote_id, product_id, product_name, quantity, unit_price, discount";

pub struct SqliteQuoteRepo {
    pool: SqlitePool,
}

impl SqliteQuoteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_items(conn: &mut SqliteConnection, items: &[QuoteItem]) -> Result<(), AppError> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO quote_items (id, quote_id, position, product_id, product_name, quantity, unit_price, discount)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&item.id)
            .bind(&item.quote_id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount)
            .execute(&mut *conn)
            .await
            .map_err(AppError::Database)?;
    }
    Ok(())
}

async fn items_of(conn: &mut SqliteConnection, quote_id: &str) -> Result<Vec<QuoteItem>, AppError> {
    sqlx::query_as::<_, QuoteItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM quote_items WHERE quote_id = ? ORDER BY position"
    ))
        .bind(quote_id)
        .fetch_all(conn)
        .await
        .map_err(AppError::Database)
}

#[async_trait]
impl QuoteRepository for SqliteQuoteRepo {
    async fn create(&self, quote: &Quote) -> Result<Quote, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            sqlx::query(&format!(
                "INSERT INTO quotes ({QUOTE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))
                .bind(&quote.id)
                .bind(&quote.client_id)
                .bind(&quote.client_name)
                .bind(&quote.payment_terms)
                .bind(quote.discount)
                .bind(&quote.status)
                .bind(quote.expiration_date)
                .bind(&quote.notes)
                .bind(quote.created_at)
                .bind(quote.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            insert_items(&mut *tx, &quote.items).await
        }
        .await;
        finish(tx, outcome).await?;

        info!(quote_id = %quote.id, items = quote.items.len(), "Quote created");
        Ok(quote.clone())
    }

    async fn list(&self) -> Result<Vec<Quote>, AppError> {
        let mut quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let items = sqlx::query_as::<_, QuoteItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM quote_items ORDER BY quote_id, position"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut by_quote: HashMap<String, Vec<QuoteItem>> = HashMap::new();
        for item in items {
            by_quote.entry(item.quote_id.clone()).or_default().push(item);
        }
        for quote in &mut quotes {
            quote.items = by_quote.remove(&quote.id).unwrap_or_default();
        }
        Ok(quotes)
    }

    async fn update(&self, id: &str, mut update: QuoteUpdate) -> Result<Quote, AppError> {
        let new_items = update.items.take();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            let mut quote = sqlx::query_as::<_, Quote>(&format!(
                "UPDATE quotes SET
                    client_id = COALESCE(?, client_id),
                    client_name = COALESCE(?, client_name),
                    payment_terms = COALESCE(?, payment_terms),
                    discount = COALESCE(?, discount),
                    status = COALESCE(?, status),
                    expiration_date = COALESCE(?, expiration_date),
                    notes = COALESCE(?, notes),
                    updated_at = ?
                 WHERE id = ?
                 RETURNING {QUOTE_COLUMNS}"
            ))
                .bind(&update.client_id)
                .bind(&update.client_name)
                .bind(&update.payment_terms)
                .bind(update.discount)
                .bind(&update.status)
                .bind(update.expiration_date)
                .bind(&update.notes)
                .bind(Utc::now())
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?
                .ok_or_else(|| AppError::NotFound("Quote not found".into()))?;

            quote.items = match new_items {
                Some(items) => {
                    sqlx::query("DELETE FROM quote_items WHERE quote_id = ?")
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(AppError::Database)?;
                    let items: Vec<QuoteItem> = items.into_iter().map(|item| QuoteItem::new(id, item)).collect();
                    insert_items(&mut *tx, &items).await?;
                    items
                }
                None => items_of(&mut *tx, id).await?,
            };
            Ok::<_, AppError>(quote)
        }
        .await;
        let quote = finish(tx, outcome).await?;

        info!(quote_id = %quote.id, "Quote updated");
        Ok(quote)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Quote not found".into()));
        }
        Ok(())
    }
}
