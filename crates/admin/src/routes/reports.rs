//! Reports route handler.

use std::collections::BTreeMap;

use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Response, routing::get};
use tower_sessions::Session;
use tracing::instrument;

use ims_core::Price;

use crate::components::ShellView;
use crate::db::RecordRepository;
use crate::db::fixtures::{MONTHLY_FIGURES, MonthlyFigures, annual_sales};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::models::{Customer, InventoryItem};
use crate::state::AppState;

use super::{page, shell};

/// Customers listed under "Top Customers".
pub const TOP_CUSTOMER_COUNT: usize = 5;

/// Stock on hand for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValue {
    pub category: String,
    pub items: usize,
    pub units: u64,
    pub value: Price,
}

/// Value of stock on hand per category, most valuable first.
#[must_use]
pub fn inventory_value_by_category(inventory: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut by_category: BTreeMap<&str, CategoryValue> = BTreeMap::new();
    for item in inventory {
        let entry = by_category
            .entry(item.category.as_str())
            .or_insert_with(|| CategoryValue {
                category: item.category.clone(),
                items: 0,
                units: 0,
                value: Price::ZERO,
            });
        entry.items += 1;
        entry.units += u64::from(item.stock_quantity);
        entry.value = entry.value + item.stock_value();
    }

    let mut values: Vec<CategoryValue> = by_category.into_values().collect();
    values.sort_by(|a, b| b.value.cmp(&a.value));
    values
}

/// Customers with the most orders.
fn top_customers(customers: &[Customer]) -> Vec<&Customer> {
    let mut ranked: Vec<&Customer> = customers.iter().collect();
    ranked.sort_by(|a, b| b.total_orders.cmp(&a.total_orders));
    ranked.truncate(TOP_CUSTOMER_COUNT);
    ranked
}

/// Top customer row.
#[derive(Debug, Clone)]
pub struct TopCustomerView {
    pub name: String,
    pub email: String,
    pub total_orders: u32,
}

/// Reports page template.
#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsTemplate {
    pub shell: ShellView,
    pub months: &'static [MonthlyFigures],
    pub annual_sales: String,
    pub annual_orders: u32,
    pub categories: Vec<CategoryValue>,
    pub inventory_value: String,
    pub top_customers: Vec<TopCustomerView>,
}

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new().route("/reports", get(reports))
}

/// Reports page.
///
/// GET /reports
#[instrument(skip_all)]
async fn reports(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let inventory = state.inventory().list()?;
    let customers = state.customers().list()?;

    let categories = inventory_value_by_category(&inventory);
    let inventory_value: Price = categories.iter().map(|c| c.value).sum();

    let template = ReportsTemplate {
        shell: shell(&state, &session, &identity, "/reports").await,
        months: &MONTHLY_FIGURES,
        annual_sales: annual_sales().to_string(),
        annual_orders: MONTHLY_FIGURES.iter().map(|m| m.orders).sum(),
        categories,
        inventory_value: inventory_value.to_string(),
        top_customers: top_customers(&customers)
            .into_iter()
            .map(|c| TopCustomerView {
                name: c.name.clone(),
                email: c.email.clone(),
                total_orders: c.total_orders,
            })
            .collect(),
    };
    Ok(page(StatusCode::OK, &template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[test]
    fn test_inventory_value_by_category() {
        let values = inventory_value_by_category(&fixtures::inventory());
        let names: Vec<_> = values.iter().map(|v| v.category.as_str()).collect();
        assert_eq!(
            names,
            ["Electronics", "Wearables", "Furniture", "Appliances", "Home"]
        );

        let electronics = &values[0];
        assert_eq!(electronics.items, 6);
        assert_eq!(electronics.units, 85);
        assert_eq!(electronics.value, Price::from_cents(4_829_915));
    }

    #[test]
    fn test_out_of_stock_items_add_no_value() {
        let mut inventory = fixtures::inventory();
        inventory.retain(|i| i.name == "Bluetooth Speaker");
        let values = inventory_value_by_category(&inventory);
        assert_eq!(values[0].value, Price::ZERO);
        assert_eq!(values[0].items, 1);
    }

    #[test]
    fn test_top_customers_by_orders() {
        let customers = fixtures::customers();
        let names: Vec<_> = top_customers(&customers)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Diana Miller", "Alice Johnson", "Bob Smith", "Edward Wilson", "Charlie Davis"]
        );
    }

    #[test]
    fn test_annual_order_count() {
        let orders: u32 = MONTHLY_FIGURES.iter().map(|m| m.orders).sum();
        assert_eq!(orders, 3733);
    }
}
