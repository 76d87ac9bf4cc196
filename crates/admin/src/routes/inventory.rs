//! Inventory screen.

use chrono::Utc;

use ims_core::{Choice, InventoryItemId};

use crate::components::{CellRenderer, Column, DataTableConfig, FieldValue, Tone};
use crate::db::RecordRepository;
use crate::forms::{FieldErrors, FieldSpec, FormData, InputKind, Validator};
use crate::models::InventoryItem;
use crate::state::AppState;

use super::records::RecordScreen;

/// Products and stock levels.
pub struct InventoryScreen;

fn stock_tone(status: &str) -> Tone {
    if status == "In Stock" {
        Tone::Success
    } else {
        Tone::Danger
    }
}

impl RecordScreen for InventoryScreen {
    type Row = InventoryItem;

    const PATH: &'static str = "/inventory";
    const TITLE: &'static str = "Inventory";
    const SUBTITLE: &'static str = "Manage your products and stock levels";
    const HEADING: &'static str = "Products";
    const NOUN: &'static str = "Product";
    const COUNT_NOUN: &'static str = "items";
    const ADD_LABEL: &'static str = "Add Product";
    const SEARCH_KEY: &'static str = "name";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Product Name", InputKind::Text),
        FieldSpec::required("category", "Category", InputKind::Text),
        FieldSpec::required("price", "Price", InputKind::Number { min: "0", step: "0.01" }),
        FieldSpec::required(
            "stock_quantity",
            "Stock Quantity",
            InputKind::Number { min: "0", step: "1" },
        ),
    ];

    fn repository(state: &AppState) -> &dyn RecordRepository<InventoryItem> {
        state.inventory()
    }

    fn columns() -> Vec<Column<InventoryItem>> {
        vec![
            Column::new("id", "ID", |i: &InventoryItem| FieldValue::text(i.id.as_str())),
            Column::sortable("name", "Product Name", |i: &InventoryItem| {
                FieldValue::text(&i.name)
            }),
            Column::new("category", "Category", |i: &InventoryItem| {
                FieldValue::text(&i.category)
            })
            .render_as(CellRenderer::Badge),
            Column::sortable("price", "Price", |i: &InventoryItem| i.price.into())
                .render_as(CellRenderer::Currency),
            Column::sortable("stock_quantity", "Stock", |i: &InventoryItem| {
                i.stock_quantity.into()
            })
            .render_as(CellRenderer::Integer),
            Column::new("status", "Status", |i: &InventoryItem| {
                FieldValue::text(i.stock_status().label())
            })
            .render_as(CellRenderer::StatusBadge(stock_tone)),
            Column::new("last_updated", "Last Updated", |i: &InventoryItem| {
                i.last_updated.into()
            })
            .render_as(CellRenderer::Date),
        ]
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("inventory")
            .search_placeholder("Search products...")
            .empty_state("No products found", Some("Add a product to start tracking stock."))
    }

    fn label(row: &InventoryItem) -> String {
        row.name.clone()
    }

    fn form_data(row: &InventoryItem) -> FormData {
        FormData::new()
            .with("name", &row.name)
            .with("category", &row.category)
            .with("price", row.price.amount())
            .with("stock_quantity", row.stock_quantity)
    }

    fn parse(form: &FormData, existing: Option<&InventoryItem>) -> Result<InventoryItem, FieldErrors> {
        let mut v = Validator::new(form);
        let name = v.required("name", "Product name");
        let category = v.required("category", "Category");
        let price = v.price("price", "Price");
        let stock_quantity = v.integer("stock_quantity", "Stock quantity", 0..=u32::MAX);

        let (Some(name), Some(category), Some(price), Some(stock_quantity)) =
            (name, category, price, stock_quantity)
        else {
            return Err(v.into_errors());
        };

        Ok(InventoryItem {
            id: existing.map_or_else(|| InventoryItemId::new(""), |e| e.id.clone()),
            name,
            category,
            price,
            stock_quantity,
            last_updated: Utc::now().date_naive(),
        })
    }
}
