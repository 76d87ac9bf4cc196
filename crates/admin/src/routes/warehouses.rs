//! Warehouses screen.

use ims_core::WarehouseId;

use crate::components::{CellRenderer, Column, DataTableConfig, FieldValue};
use crate::db::RecordRepository;
use crate::forms::{FieldErrors, FieldSpec, FormData, InputKind, Validator};
use crate::models::Warehouse;
use crate::state::AppState;

use super::records::RecordScreen;

/// Storage locations and their utilization.
pub struct WarehousesScreen;

const WHOLE_NUMBER: InputKind = InputKind::Number { min: "0", step: "1" };

impl RecordScreen for WarehousesScreen {
    type Row = Warehouse;

    const PATH: &'static str = "/warehouses";
    const TITLE: &'static str = "Warehouses";
    const SUBTITLE: &'static str = "Manage your storage locations";
    const HEADING: &'static str = "Warehouse Locations";
    const NOUN: &'static str = "Warehouse";
    const COUNT_NOUN: &'static str = "locations";
    const ADD_LABEL: &'static str = "Add Warehouse";
    const SEARCH_KEY: &'static str = "name";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Warehouse Name", InputKind::Text),
        FieldSpec::required("location", "Location", InputKind::Text),
        FieldSpec::required("manager", "Manager", InputKind::Text),
        FieldSpec::required("capacity", "Capacity", InputKind::Number { min: "1", step: "1" }),
        FieldSpec::required("utilized", "Utilized", WHOLE_NUMBER),
        FieldSpec::required("products", "Products", WHOLE_NUMBER),
    ];

    fn repository(state: &AppState) -> &dyn RecordRepository<Warehouse> {
        state.warehouses()
    }

    fn columns() -> Vec<Column<Warehouse>> {
        vec![
            Column::new("id", "ID", |w: &Warehouse| FieldValue::text(w.id.as_str())),
            Column::sortable("name", "Warehouse Name", |w: &Warehouse| {
                FieldValue::text(&w.name)
            }),
            Column::new("location", "Location", |w: &Warehouse| FieldValue::text(&w.location)),
            Column::new("manager", "Manager", |w: &Warehouse| FieldValue::text(&w.manager)),
            Column::new("products", "Products", |w: &Warehouse| w.products.into())
                .render_as(CellRenderer::Integer),
            Column::sortable("utilization", "Utilization", |w: &Warehouse| {
                w.utilization_percent().into()
            })
            .render_as(CellRenderer::Percent),
        ]
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("warehouses")
            .search_placeholder("Search warehouses...")
            .empty_state("No warehouses found", None)
    }

    fn label(row: &Warehouse) -> String {
        row.name.clone()
    }

    fn form_data(row: &Warehouse) -> FormData {
        FormData::new()
            .with("name", &row.name)
            .with("location", &row.location)
            .with("manager", &row.manager)
            .with("capacity", row.capacity)
            .with("utilized", row.utilized)
            .with("products", row.products)
    }

    fn parse(form: &FormData, existing: Option<&Warehouse>) -> Result<Warehouse, FieldErrors> {
        let mut v = Validator::new(form);
        let name = v.required("name", "Warehouse name");
        let location = v.required("location", "Location");
        let manager = v.required("manager", "Manager");
        let capacity = v.integer("capacity", "Capacity", 1..=u32::MAX);
        let utilized = v.integer("utilized", "Utilized", 0..=u32::MAX);
        let products = v.integer("products", "Products", 0..=u32::MAX);

        if let (Some(capacity), Some(utilized)) = (capacity, utilized) {
            if utilized > capacity {
                v.reject("utilized", "Utilized cannot exceed capacity");
            }
        }

        let (
            true,
            Some(name),
            Some(location),
            Some(manager),
            Some(capacity),
            Some(utilized),
            Some(products),
        ) = (v.is_valid(), name, location, manager, capacity, utilized, products)
        else {
            return Err(v.into_errors());
        };

        Ok(Warehouse {
            id: existing.map_or_else(|| WarehouseId::new(""), |e| e.id.clone()),
            name,
            location,
            manager,
            capacity,
            utilized,
            products,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::{RecordTable, SortDirection, TableQuery};
    use crate::db::fixtures;

    fn form(capacity: &str, utilized: &str) -> FormData {
        FormData::new()
            .with("name", "Overflow Depot")
            .with("location", "Denver, CO")
            .with("manager", "Priya Shah")
            .with("capacity", capacity)
            .with("utilized", utilized)
            .with("products", "12")
    }

    #[test]
    fn test_parse_valid_warehouse() {
        let warehouse = WarehousesScreen::parse(&form("2000", "500"), None).unwrap();
        assert_eq!(warehouse.utilization_percent(), 25);
        assert_eq!(warehouse.products, 12);
    }

    #[test]
    fn test_utilized_cannot_exceed_capacity() {
        let errors = WarehousesScreen::parse(&form("100", "101"), None).unwrap_err();
        assert_eq!(errors.get("utilized"), Some("Utilized cannot exceed capacity"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let errors = WarehousesScreen::parse(&form("0", "0"), None).unwrap_err();
        assert_eq!(errors.get("capacity"), Some("Capacity must be at least 1"));
    }

    #[test]
    fn test_sort_by_utilization() {
        let warehouses = fixtures::warehouses();
        let columns = WarehousesScreen::columns();
        let table = RecordTable::new(&columns, WarehousesScreen::SEARCH_KEY);
        let query = TableQuery {
            sort: Some("utilization".into()),
            dir: Some(SortDirection::Desc),
            ..TableQuery::default()
        };
        let window = table.window(&warehouses, &query);
        assert_eq!(window.rows[0].id.as_str(), "WH-003");
        assert_eq!(window.rows[4].id.as_str(), "WH-004");

        let cells: Vec<_> = columns.iter().map(|c| c.cell(window.rows[0])).collect();
        assert_eq!(cells[5].text, "91%");
    }
}
