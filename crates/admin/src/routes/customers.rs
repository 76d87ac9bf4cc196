//! Customers screen.

use ims_core::{Choice, CustomerId, CustomerStatus};

use crate::components::{CellRenderer, Column, DataTableConfig, FieldValue, Tone};
use crate::db::RecordRepository;
use crate::forms::{
    FieldErrors, FieldSpec, FormData, InputKind, Validator, choice_options, format_date,
};
use crate::models::Customer;
use crate::state::AppState;

use super::records::RecordScreen;

/// Customer directory.
pub struct CustomersScreen;

fn status_tone(status: &str) -> Tone {
    match CustomerStatus::from_form_value(status) {
        Some(CustomerStatus::Active) => Tone::Success,
        _ => Tone::Neutral,
    }
}

impl RecordScreen for CustomersScreen {
    type Row = Customer;

    const PATH: &'static str = "/customers";
    const TITLE: &'static str = "Customers";
    const SUBTITLE: &'static str = "View and manage all your customers";
    const HEADING: &'static str = "All Customers";
    const NOUN: &'static str = "Customer";
    const COUNT_NOUN: &'static str = "customers";
    const ADD_LABEL: &'static str = "Add Customer";
    const SEARCH_KEY: &'static str = "name";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Customer Name", InputKind::Text),
        FieldSpec::required("email", "Email", InputKind::Email),
        FieldSpec::required("phone", "Phone", InputKind::Tel),
        FieldSpec::required("status", "Status", InputKind::Select(choice_options::<CustomerStatus>)),
        FieldSpec::required(
            "total_orders",
            "Total Orders",
            InputKind::Number { min: "0", step: "1" },
        ),
        FieldSpec::optional("last_order_date", "Last Order", InputKind::Date),
    ];

    fn repository(state: &AppState) -> &dyn RecordRepository<Customer> {
        state.customers()
    }

    fn columns() -> Vec<Column<Customer>> {
        vec![
            Column::sortable("name", "Customer Name", |c: &Customer| FieldValue::text(&c.name)),
            Column::sortable("email", "Email", |c: &Customer| FieldValue::text(&c.email))
                .render_as(CellRenderer::Email),
            Column::new("phone", "Phone", |c: &Customer| FieldValue::text(&c.phone))
                .render_as(CellRenderer::Phone),
            Column::new("status", "Status", |c: &Customer| FieldValue::text(c.status.as_str()))
                .render_as(CellRenderer::StatusBadge(status_tone)),
            Column::sortable("total_orders", "Total Orders", |c: &Customer| {
                c.total_orders.into()
            })
            .render_as(CellRenderer::Integer),
            Column::sortable("last_order_date", "Last Order", |c: &Customer| {
                c.last_order_date.into()
            })
            .render_as(CellRenderer::Date),
        ]
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("customers")
            .search_placeholder("Search customers...")
            .empty_state("No customers found", None)
    }

    fn label(row: &Customer) -> String {
        row.name.clone()
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("status", CustomerStatus::Active.as_str())
            .with("total_orders", 0)
    }

    fn form_data(row: &Customer) -> FormData {
        FormData::new()
            .with("name", &row.name)
            .with("email", &row.email)
            .with("phone", &row.phone)
            .with("status", row.status.as_str())
            .with("total_orders", row.total_orders)
            .with(
                "last_order_date",
                row.last_order_date.map(format_date).unwrap_or_default(),
            )
    }

    fn parse(form: &FormData, existing: Option<&Customer>) -> Result<Customer, FieldErrors> {
        let mut v = Validator::new(form);
        let name = v.required("name", "Customer name");
        let email = v.email("email");
        let phone = v.required("phone", "Phone");
        let status = v.choice::<CustomerStatus>("status", "Status");
        let total_orders = v.integer("total_orders", "Total orders", 0..=u32::MAX);
        let last_order_date = v.optional_date("last_order_date", "Last order");

        let (
            Some(name),
            Some(email),
            Some(phone),
            Some(status),
            Some(total_orders),
            Some(last_order_date),
        ) = (name, email, phone, status, total_orders, last_order_date)
        else {
            return Err(v.into_errors());
        };

        Ok(Customer {
            id: existing.map_or_else(|| CustomerId::new(""), |e| e.id.clone()),
            name,
            email: email.into_inner(),
            phone,
            status,
            total_orders,
            last_order_date,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::{RecordTable, TableQuery};
    use crate::db::fixtures;

    fn form(email: &str, last_order_date: &str) -> FormData {
        FormData::new()
            .with("name", "Grace Hopper")
            .with("email", email)
            .with("phone", "(555) 000-1111")
            .with("status", "inactive")
            .with("total_orders", "0")
            .with("last_order_date", last_order_date)
    }

    #[test]
    fn test_parse_without_last_order() {
        let customer = CustomersScreen::parse(&form("grace@example.com", ""), None).unwrap();
        assert_eq!(customer.email, "grace@example.com");
        assert_eq!(customer.status, CustomerStatus::Inactive);
        assert_eq!(customer.last_order_date, None);
    }

    #[test]
    fn test_parse_rejects_bad_email_and_date() {
        let errors = CustomersScreen::parse(&form("grace", "yesterday"), None).unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert_eq!(
            errors.get("last_order_date"),
            Some("Last order must be a date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn test_contact_cells_link_out() {
        let customers = fixtures::customers();
        let columns = CustomersScreen::columns();
        let table = RecordTable::new(&columns, CustomersScreen::SEARCH_KEY)
            .row_key(|c: &Customer| c.id.to_string());
        let view = table.render(&customers, &TableQuery::default(), CustomersScreen::PATH);

        let first = &view.rows[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.cells[1].href.as_deref(), Some("mailto:alice@example.com"));
        assert_eq!(first.cells[2].href.as_deref(), Some("tel:5551234567"));
        assert_eq!(first.cells[3].badge_class, Some("badge badge-success"));
        assert_eq!(view.rows[2].cells[3].badge_class, Some("badge badge-neutral"));
    }
}
