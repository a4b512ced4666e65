//! Stock item entity model and DTOs.

use nomade_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full stock item row from the `stock_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new stock item.
#[derive(Debug)]
pub struct CreateStockItem {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: String,
}

/// DTO for updating a stock item. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateStockItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
}
