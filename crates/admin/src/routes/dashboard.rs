//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Response, routing::get};
use tower_sessions::Session;
use tracing::instrument;

use ims_core::{Choice, OrderStatus, ShipmentStatus};

use crate::components::ShellView;
use crate::components::data_table::group_thousands;
use crate::db::RecordRepository;
use crate::error::AppError;
use crate::filters;
use crate::forms::format_date;
use crate::middleware::RequireIdentity;
use crate::models::{InventoryItem, Order, Shipment};
use crate::state::AppState;

use super::{page, shell};

/// Number of orders listed under "Recent Orders".
pub const RECENT_ORDER_COUNT: usize = 5;

/// Headline figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Units on hand across every item.
    pub total_stock: u64,
    pub pending_orders: usize,
    pub low_stock_items: usize,
    pub in_transit_shipments: usize,
}

impl DashboardMetrics {
    /// Compute the headline figures from current records.
    #[must_use]
    pub fn compute(
        inventory: &[InventoryItem],
        orders: &[Order],
        shipments: &[Shipment],
        low_stock_threshold: u32,
    ) -> Self {
        Self {
            total_stock: inventory.iter().map(|i| u64::from(i.stock_quantity)).sum(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            low_stock_items: inventory
                .iter()
                .filter(|i| i.stock_quantity < low_stock_threshold)
                .count(),
            in_transit_shipments: shipments
                .iter()
                .filter(|s| s.status == ShipmentStatus::InTransit)
                .count(),
        }
    }
}

/// Stat card.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub href: &'static str,
}

/// Low-stock row.
#[derive(Debug, Clone)]
pub struct LowStockView {
    pub name: String,
    pub category: String,
    pub stock_quantity: u32,
    pub out_of_stock: bool,
}

/// Recent order row.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub id: String,
    pub customer: String,
    pub date: String,
    pub total: String,
    pub status: &'static str,
}

/// Items below `threshold`, fewest units first.
fn low_stock(inventory: &[InventoryItem], threshold: u32) -> Vec<LowStockView> {
    let mut low: Vec<&InventoryItem> = inventory
        .iter()
        .filter(|i| i.stock_quantity < threshold)
        .collect();
    low.sort_by_key(|i| i.stock_quantity);
    low.into_iter()
        .map(|i| LowStockView {
            name: i.name.clone(),
            category: i.category.clone(),
            stock_quantity: i.stock_quantity,
            out_of_stock: !i.in_stock(),
        })
        .collect()
}

/// The most recent orders by date, newest first.
fn recent_orders(orders: &[Order]) -> Vec<RecentOrderView> {
    let mut recent: Vec<&Order> = orders.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
        .into_iter()
        .take(RECENT_ORDER_COUNT)
        .map(|o| RecentOrderView {
            id: o.id.to_string(),
            customer: o.customer.clone(),
            date: format_date(o.date),
            total: o.total.to_string(),
            status: o.status.label(),
        })
        .collect()
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shell: ShellView,
    pub greeting: String,
    pub stats: Vec<StatCard>,
    pub low_stock_threshold: u32,
    pub low_stock: Vec<LowStockView>,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard page.
///
/// GET /
#[instrument(skip_all)]
async fn dashboard(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let inventory = state.inventory().list()?;
    let orders = state.orders().list()?;
    let shipments = state.shipments().list()?;
    let threshold = state.settings().get()?.low_stock_threshold;

    let metrics = DashboardMetrics::compute(&inventory, &orders, &shipments, threshold);
    let count = |n: usize| group_thousands(i64::try_from(n).unwrap_or(i64::MAX));

    let template = DashboardTemplate {
        shell: shell(&state, &session, &identity, "/").await,
        greeting: format!("Welcome back, {}", identity.name),
        stats: vec![
            StatCard {
                title: "Total Inventory",
                value: group_thousands(i64::try_from(metrics.total_stock).unwrap_or(i64::MAX)),
                href: "/inventory",
            },
            StatCard {
                title: "Pending Orders",
                value: count(metrics.pending_orders),
                href: "/orders",
            },
            StatCard {
                title: "Low Stock Items",
                value: count(metrics.low_stock_items),
                href: "/inventory",
            },
            StatCard {
                title: "Shipments In Transit",
                value: count(metrics.in_transit_shipments),
                href: "/shipments",
            },
        ],
        low_stock_threshold: threshold,
        low_stock: low_stock(&inventory, threshold),
        recent_orders: recent_orders(&orders),
    };
    Ok(page(StatusCode::OK, &template))
}
