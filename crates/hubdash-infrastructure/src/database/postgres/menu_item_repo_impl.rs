// ============================================================================
// Hubdash Infrastructure - PostgreSQL MenuItem Repository
// File: crates/hubdash-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use hubdash_core::domain::MenuItem;
use hubdash_core::error::DomainError;
use hubdash_core::repositories::MenuItemRepository;

const COLUMNS: &str = "id, text, link, icon, new_tab, enabled, sort_order, created_at";

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting menu items"))?;
        Ok(count.max(0) as u64)
    }

    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM menu_items ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing menu items"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding menu item by id"))?;

        Ok(row.map(Into::into))
    }

    async fn insert_many(&self, items: &[MenuItem]) -> Result<u64, DomainError> {
        let mut inserted = 0;
        for item in items {
            let result = sqlx::query(
                r#"
                INSERT INTO menu_items (id, text, link, icon, new_tab, enabled, sort_order, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(&item.text)
            .bind(&item.link)
            .bind(&item.icon)
            .bind(item.new_tab)
            .bind(item.enabled)
            .bind(item.order)
            .bind(item.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("inserting menu items"))?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        info!("Creating menu item: {}", item.text);

        let row: MenuItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO menu_items (id, text, link, icon, new_tab, enabled, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.text)
        .bind(&item.link)
        .bind(&item.icon)
        .bind(item.new_tab)
        .bind(item.enabled)
        .bind(item.order)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating menu item"))?;

        Ok(row.into())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            r#"
            UPDATE menu_items
            SET text = $2, link = $3, icon = $4, new_tab = $5, enabled = $6, sort_order = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.text)
        .bind(&item.link)
        .bind(&item.icon)
        .bind(item.new_tab)
        .bind(item.enabled)
        .bind(item.order)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating menu item"))?;

        row.map(Into::into)
            .ok_or(DomainError::MenuItemNotFound(item.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting menu item"))?;

        Ok(result.rows_affected() > 0)
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    id: Uuid,
    text: String,
    link: String,
    icon: Option<String>,
    new_tab: bool,
    enabled: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            text: row.text,
            link: row.link,
            icon: row.icon,
            new_tab: row.new_tab,
            enabled: row.enabled,
            order: row.sort_order,
            created_at: row.created_at,
        }
    }
}
