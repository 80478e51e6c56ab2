use std::collections::HashMap;
use crate::domain::models::sale::{Sale, SaleItem, SaleUpdate};
use crate::domain::ports::SaleRepository;
use crate::error::AppError;
use crate::infra::db::finish;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

const SALE_COLUMNS: &str =
    "id, linked_quote_id, client_id, client_name, payment_terms, discount, status, notes, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, sale_id, product_id, product_name, quantity, unit_price, discount";

pub struct SqliteSaleRepo {
    pool: SqlitePool,
}

impl SqliteSaleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_items(conn: &mut SqliteConnection, items: &[SaleItem]) -> Result<(), AppError> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO sale_items (id, sale_id, position, product_id, product_name, quantity, unit_price, discount)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&item.id)
            .bind(&item.sale_id)
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

async fn items_of(conn: &mut SqliteConnection, sale_id: &str) -> Result<Vec<SaleItem>, AppError> {
    sqlx::query_as::<_, SaleItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ? ORDER BY position"
    ))
        .bind(sale_id)
        .fetch_all(conn)
        .await
        .map_err(AppError::Database)
}

#[async_trait]
impl SaleRepository for SqliteSaleRepo {
    async fn create(&self, sale: &Sale) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            sqlx::query(&format!(
                "INSERT INTO sales ({SALE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))
                .bind(&sale.id)
                .bind(&sale.linked_quote_id)
                .bind(&sale.client_id)
                .bind(&sale.client_name)
                .bind(&sale.payment_terms)
                .bind(sale.discount)
                .bind(&sale.status)
                .bind(&sale.notes)
                .bind(sale.created_at)
                .bind(sale.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::referential(e, "Linked quote not found"))?;

            insert_items(&mut *tx, &sale.items).await
        }
        .await;
        finish(tx, outcome).await?;

        info!(sale_id = %sale.id, items = sale.items.len(), "Sale created");
        Ok(sale.clone())
    }

    async fn list(&self) -> Result<Vec<Sale>, AppError> {
        let mut sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items ORDER BY sale_id, position"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
        for item in items {
            by_sale.entry(item.sale_id.clone()).or_default().push(item);
        }
        for sale in &mut sales {
            sale.items = by_sale.remove(&sale.id).unwrap_or_default();
        }
        Ok(sales)
    }

    async fn update(&self, id: &str, mut update: SaleUpdate) -> Result<Sale, AppError> {
        let new_items = update.items.take();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            let mut sale = sqlx::query_as::<_, Sale>(&format!(
                "UPDATE sales SET
                    client_id = COALESCE(?, client_id),
                    client_name = COALESCE(?, client_name),
                    payment_terms = COALESCE(?, payment_terms),
                    discount = COALESCE(?, discount),
                    status = COALESCE(?, status),
                    notes = COALESCE(?, notes),
                    updated_at = ?
                 WHERE id = ?
                 RETURNING {SALE_COLUMNS}"
            ))
                .bind(&update.client_id)
                .bind(&update.client_name)
                .bind(&update.payment_terms)
                .bind(update.discount)
                .bind(&update.status)
                .bind(&update.notes)
                .bind(Utc::now())
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?
                .ok_or_else(|| AppError::NotFound("Sale not found".into()))?;

            sale.items = match new_items {
                Some(items) => {
                    sqlx::query("DELETE FROM sale_items WHERE sale_id = ?")
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(AppError::Database)?;
                    let items: Vec<SaleItem> = items.into_iter().map(|item| SaleItem::new(id, item)).collect();
                    insert_items(&mut *tx, &items).await?;
                    items
                }
                None => items_of(&mut *tx, id).await?,
            };
            Ok::<_, AppError>(sale)
        }
        .await;
        let sale = finish(tx, outcome).await?;

        info!(sale_id = %sale.id, "Sale updated");
        Ok(sale)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sale not found".into()));
        }
        Ok(())
    }
}
