//! Orders screen.

use ims_core::{Choice, OrderId, OrderStatus};

use crate::components::{CellRenderer, Column, DataTableConfig, FieldValue, Tone};
use crate::db::RecordRepository;
use crate::forms::{
    FieldErrors, FieldSpec, FormData, InputKind, Validator, choice_options, format_date,
};
use crate::models::Order;
use crate::state::AppState;

use super::records::RecordScreen;

/// Customer orders.
pub struct OrdersScreen;

fn status_tone(status: &str) -> Tone {
    match OrderStatus::from_form_value(status) {
        Some(OrderStatus::Pending) => Tone::Warning,
        Some(OrderStatus::Processing) => Tone::Info,
        Some(OrderStatus::Shipped) => Tone::Accent,
        Some(OrderStatus::Delivered) => Tone::Success,
        None => Tone::Neutral,
    }
}

const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("Credit Card", "Credit Card"),
    ("PayPal", "PayPal"),
    ("Bank Transfer", "Bank Transfer"),
];

fn payment_options() -> Vec<(&'static str, &'static str)> {
    PAYMENT_METHODS.to_vec()
}

impl RecordScreen for OrdersScreen {
    type Row = Order;

    const PATH: &'static str = "/orders";
    const TITLE: &'static str = "Orders";
    const SUBTITLE: &'static str = "Manage customer orders";
    const HEADING: &'static str = "Order List";
    const NOUN: &'static str = "Order";
    const COUNT_NOUN: &'static str = "orders";
    const ADD_LABEL: &'static str = "New Order";
    const SEARCH_KEY: &'static str = "customer";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("customer", "Customer", InputKind::Text),
        FieldSpec::required("date", "Order Date", InputKind::Date),
        FieldSpec::required("total", "Total", InputKind::Number { min: "0", step: "0.01" }),
        FieldSpec::required("items", "Items", InputKind::Number { min: "1", step: "1" }),
        FieldSpec::required("status", "Status", InputKind::Select(choice_options::<OrderStatus>)),
        FieldSpec::required("payment_method", "Payment Method", InputKind::Select(payment_options)),
    ];

    fn repository(state: &AppState) -> &dyn RecordRepository<Order> {
        state.orders()
    }

    fn columns() -> Vec<Column<Order>> {
        vec![
            Column::new("id", "Order ID", |o: &Order| FieldValue::text(o.id.as_str())),
            Column::sortable("customer", "Customer", |o: &Order| FieldValue::text(&o.customer)),
            Column::sortable("date", "Date", |o: &Order| o.date.into()).render_as(CellRenderer::Date),
            Column::sortable("total", "Total", |o: &Order| o.total.into())
                .render_as(CellRenderer::Currency),
            Column::new("items", "Items", |o: &Order| o.items.into())
                .render_as(CellRenderer::Integer),
            Column::new("status", "Status", |o: &Order| FieldValue::text(o.status.as_str()))
                .render_as(CellRenderer::StatusBadge(status_tone)),
            Column::new("payment_method", "Payment", |o: &Order| {
                FieldValue::text(&o.payment_method)
            }),
        ]
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("orders")
            .search_placeholder("Search by customer...")
            .empty_state("No orders found", None)
    }

    fn label(row: &Order) -> String {
        format!("Order {}", row.id)
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("date", format_date(chrono::Utc::now().date_naive()))
            .with("items", 1)
            .with("status", OrderStatus::Pending.as_str())
            .with("payment_method", "Credit Card")
    }

    fn form_data(row: &Order) -> FormData {
        FormData::new()
            .with("customer", &row.customer)
            .with("date", format_date(row.date))
            .with("total", row.total.amount())
            .with("items", row.items)
            .with("status", row.status.as_str())
            .with("payment_method", &row.payment_method)
    }

    fn parse(form: &FormData, existing: Option<&Order>) -> Result<Order, FieldErrors> {
        let mut v = Validator::new(form);
        let customer = v.required("customer", "Customer");
        let date = v.date("date", "Order date");
        let total = v.price("total", "Total");
        let items = v.integer("items", "Items", 1..=u32::MAX);
        let status = v.choice::<OrderStatus>("status", "Status");
        let payment_method = v.option("payment_method", "Payment method", PAYMENT_METHODS);

        let (
            Some(customer),
            Some(date),
            Some(total),
            Some(items),
            Some(status),
            Some(payment_method),
        ) = (customer, date, total, items, status, payment_method)
        else {
            return Err(v.into_errors());
        };

        Ok(Order {
            id: existing.map_or_else(|| OrderId::new(""), |e| e.id.clone()),
            customer,
            date,
            total,
            status,
            items,
            payment_method,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use ims_core::Price;

    use super::*;
    use crate::components::{RecordTable, SortDirection, TableQuery};
    use crate::db::fixtures;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_valid_order() {
        let order = OrdersScreen::parse(
            &form(&[
                ("customer", "  Ada Lovelace "),
                ("date", "2023-06-01"),
                ("total", "1299.99"),
                ("items", "2"),
                ("status", "Shipped"),
                ("payment_method", "PayPal"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(order.customer, "Ada Lovelace");
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(order.total, Price::from_cents(129_999));
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_parse_rejects_empty_orders_and_unknown_status() {
        let errors = OrdersScreen::parse(
            &form(&[
                ("customer", "Ada"),
                ("date", "June 1st"),
                ("total", "10"),
                ("items", "0"),
                ("status", "Lost"),
                ("payment_method", "Cash"),
            ]),
            None,
        )
        .unwrap_err();
        assert_eq!(errors.get("date"), Some("Order date must be a date (YYYY-MM-DD)"));
        assert_eq!(errors.get("items"), Some("Items must be at least 1"));
        assert_eq!(errors.get("status"), Some("Select a valid status"));
        assert_eq!(errors.get("payment_method"), Some("Select a valid payment method"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_blank_form_defaults_are_valid_apart_from_customer() {
        let errors = OrdersScreen::parse(&OrdersScreen::blank_form(), None).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("customer").is_some());
        assert!(errors.get("total").is_some());
    }

    #[test]
    fn test_sort_by_total_descending() {
        let orders = fixtures::orders();
        let columns = OrdersScreen::columns();
        let table = RecordTable::new(&columns, OrdersScreen::SEARCH_KEY);
        let query = TableQuery {
            sort: Some("total".into()),
            dir: Some(SortDirection::Desc),
            ..TableQuery::default()
        };
        let window = table.window(&orders, &query);
        assert_eq!(window.rows[0].id.as_str(), "ORD-005");
        assert_eq!(window.rows[9].id.as_str(), "ORD-006");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(status_tone("Pending"), Tone::Warning);
        assert_eq!(status_tone("Delivered"), Tone::Success);
        assert_eq!(status_tone("Lost"), Tone::Neutral);
    }
}
