//! Shipments screen.

use ims_core::{Choice, ShipmentId, ShipmentStatus};

use crate::components::{CellRenderer, Column, DataTableConfig, FieldValue, Tone};
use crate::db::RecordRepository;
use crate::forms::{
    FieldErrors, FieldSpec, FormData, InputKind, Validator, choice_options, format_date,
};
use crate::models::Shipment;
use crate::state::AppState;

use super::records::RecordScreen;

/// Outbound shipments.
pub struct ShipmentsScreen;

fn status_tone(label: &str) -> Tone {
    match ShipmentStatus::ALL.iter().find(|s| s.label() == label) {
        Some(ShipmentStatus::Delivered) => Tone::Success,
        Some(ShipmentStatus::InTransit) => Tone::Info,
        Some(ShipmentStatus::Pending) => Tone::Warning,
        Some(ShipmentStatus::Returned) => Tone::Danger,
        None => Tone::Neutral,
    }
}

impl RecordScreen for ShipmentsScreen {
    type Row = Shipment;

    const PATH: &'static str = "/shipments";
    const TITLE: &'static str = "Shipments";
    const SUBTITLE: &'static str = "View and manage all shipments";
    const HEADING: &'static str = "All Shipments";
    const NOUN: &'static str = "Shipment";
    const COUNT_NOUN: &'static str = "shipments";
    const ADD_LABEL: &'static str = "New Shipment";
    const SEARCH_KEY: &'static str = "tracking_number";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("tracking_number", "Tracking Number", InputKind::Text),
        FieldSpec::required("customer", "Customer", InputKind::Text),
        FieldSpec::required("destination", "Destination", InputKind::Text),
        FieldSpec::required("status", "Status", InputKind::Select(choice_options::<ShipmentStatus>)),
        FieldSpec::required("items", "Items", InputKind::Number { min: "1", step: "1" }),
        FieldSpec::optional("shipped_date", "Shipped Date", InputKind::Date),
        FieldSpec::required("delivery_date", "Delivery Date", InputKind::Date),
    ];

    fn repository(state: &AppState) -> &dyn RecordRepository<Shipment> {
        state.shipments()
    }

    fn columns() -> Vec<Column<Shipment>> {
        vec![
            Column::sortable("tracking_number", "Tracking #", |s: &Shipment| {
                FieldValue::text(&s.tracking_number)
            }),
            Column::sortable("customer", "Customer", |s: &Shipment| FieldValue::text(&s.customer)),
            Column::new("destination", "Destination", |s: &Shipment| {
                FieldValue::text(&s.destination)
            }),
            Column::new("status", "Status", |s: &Shipment| FieldValue::text(s.status.label()))
                .render_as(CellRenderer::StatusBadge(status_tone)),
            Column::new("items", "Items", |s: &Shipment| s.items.into())
                .render_as(CellRenderer::Integer),
            Column::sortable("shipped_date", "Shipped Date", |s: &Shipment| {
                s.shipped_date.into()
            })
            .render_as(CellRenderer::Date),
            Column::sortable("delivery_date", "Delivery Date", |s: &Shipment| {
                s.delivery_date.into()
            })
            .render_as(CellRenderer::Date),
        ]
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("shipments")
            .search_placeholder("Search by tracking number...")
            .empty_state("No shipments found", None)
    }

    fn label(row: &Shipment) -> String {
        format!("Shipment {}", row.tracking_number)
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("status", ShipmentStatus::Pending.as_str())
            .with("items", 1)
    }

    fn form_data(row: &Shipment) -> FormData {
        FormData::new()
            .with("tracking_number", &row.tracking_number)
            .with("customer", &row.customer)
            .with("destination", &row.destination)
            .with("status", row.status.as_str())
            .with("items", row.items)
            .with(
                "shipped_date",
                row.shipped_date.map(format_date).unwrap_or_default(),
            )
            .with("delivery_date", format_date(row.delivery_date))
    }

    fn parse(form: &FormData, existing: Option<&Shipment>) -> Result<Shipment, FieldErrors> {
        let mut v = Validator::new(form);
        let tracking_number = v.required("tracking_number", "Tracking number");
        let customer = v.required("customer", "Customer");
        let destination = v.required("destination", "Destination");
        let status = v.choice::<ShipmentStatus>("status", "Status");
        let items = v.integer("items", "Items", 1..=u32::MAX);
        let shipped_date = v.optional_date("shipped_date", "Shipped date");
        let delivery_date = v.date("delivery_date", "Delivery date");

        if let (Some(Some(shipped)), Some(delivery)) = (shipped_date, delivery_date) {
            if delivery < shipped {
                v.reject("delivery_date", "Delivery date cannot be before the shipped date");
            }
        }

        let (
            true,
            Some(tracking_number),
            Some(customer),
            Some(destination),
            Some(status),
            Some(items),
            Some(shipped_date),
            Some(delivery_date),
        ) = (
            v.is_valid(),
            tracking_number,
            customer,
            destination,
            status,
            items,
            shipped_date,
            delivery_date,
        )
        else {
            return Err(v.into_errors());
        };

        Ok(Shipment {
            id: existing.map_or_else(|| ShipmentId::new(""), |e| e.id.clone()),
            tracking_number,
            customer,
            destination,
            status,
            items,
            shipped_date,
            delivery_date,
        })
    }
}
