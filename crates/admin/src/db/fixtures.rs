//! Seed data loaded into the repositories at startup.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use ims_core::{
    CustomerId, CustomerStatus, InventoryItemId, OrderId, OrderStatus, Price, ShipmentId,
    ShipmentStatus, WarehouseId,
};

use crate::models::{Customer, InventoryItem, Order, Shipment, UserAccount, Warehouse};
use crate::services::auth::StaticDirectory;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn dollars(cents: i64) -> Price {
    Price::from_cents(cents)
}

fn item(
    id: &str,
    name: &str,
    category: &str,
    cents: i64,
    stock_quantity: u32,
    last_updated: NaiveDate,
) -> InventoryItem {
    InventoryItem {
        id: InventoryItemId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: dollars(cents),
        stock_quantity,
        last_updated,
    }
}

/// Ten inventory items, `001` through `010`.
#[must_use]
pub fn inventory() -> Vec<InventoryItem> {
    vec![
        item("001", "Smartphone X", "Electronics", 79_999, 24, day(2023, 5, 15)),
        item("002", "Laptop Pro", "Electronics", 129_999, 12, day(2023, 5, 14)),
        item("003", "Wireless Earbuds", "Electronics", 14_999, 36, day(2023, 5, 10)),
        item("004", "Smart TV 55\"", "Electronics", 69_999, 8, day(2023, 5, 8)),
        item("005", "Coffee Maker", "Appliances", 8_999, 15, day(2023, 5, 5)),
        item("006", "Office Chair", "Furniture", 19_999, 7, day(2023, 5, 3)),
        item("007", "Desk Lamp", "Home", 4_999, 20, day(2023, 4, 28)),
        item("008", "Bluetooth Speaker", "Electronics", 7_999, 0, day(2023, 4, 25)),
        item("009", "Fitness Tracker", "Wearables", 12_999, 18, day(2023, 4, 22)),
        item("010", "Gaming Console", "Electronics", 49_999, 5, day(2023, 4, 20)),
    ]
}

fn order(
    id: &str,
    customer: &str,
    date: NaiveDate,
    cents: i64,
    status: OrderStatus,
    items: u32,
    payment_method: &str,
) -> Order {
    Order {
        id: OrderId::new(id),
        customer: customer.to_string(),
        date,
        total: dollars(cents),
        status,
        items,
        payment_method: payment_method.to_string(),
    }
}

/// Ten orders, `ORD-001` through `ORD-010`.
#[must_use]
pub fn orders() -> Vec<Order> {
    use OrderStatus::{Delivered, Pending, Processing, Shipped};

    vec![
        order("ORD-001", "John Smith", day(2023, 5, 15), 129_999, Pending, 3, "Credit Card"),
        order("ORD-002", "Emily Johnson", day(2023, 5, 14), 54_998, Processing, 2, "PayPal"),
        order("ORD-003", "Michael Davis", day(2023, 5, 13), 79_999, Shipped, 1, "Credit Card"),
        order("ORD-004", "Sarah Wilson", day(2023, 5, 10), 32_997, Delivered, 3, "PayPal"),
        order("ORD-005", "Robert Brown", day(2023, 5, 9), 149_998, Delivered, 2, "Credit Card"),
        order("ORD-006", "Jennifer Lee", day(2023, 5, 8), 24_999, Processing, 1, "PayPal"),
        order("ORD-007", "David Garcia", day(2023, 5, 7), 69_999, Pending, 1, "Credit Card"),
        order("ORD-008", "Lisa Martinez", day(2023, 5, 5), 89_997, Shipped, 3, "PayPal"),
        order("ORD-009", "Kevin Wilson", day(2023, 5, 3), 44_999, Delivered, 1, "Credit Card"),
        order("ORD-010", "Michelle Thompson", day(2023, 5, 1), 109_998, Processing, 2, "PayPal"),
    ]
}

fn warehouse(
    id: &str,
    name: &str,
    location: &str,
    manager: &str,
    capacity: u32,
    utilized: u32,
    products: u32,
) -> Warehouse {
    Warehouse {
        id: WarehouseId::new(id),
        name: name.to_string(),
        location: location.to_string(),
        manager: manager.to_string(),
        capacity,
        utilized,
        products,
    }
}

/// Five warehouses, `WH-001` through `WH-005`.
#[must_use]
pub fn warehouses() -> Vec<Warehouse> {
    vec![
        warehouse("WH-001", "North Distribution Center", "Seattle, WA", "David Wilson", 5000, 3850, 120),
        warehouse("WH-002", "East Coast Warehouse", "Boston, MA", "Sarah Johnson", 8000, 6200, 215),
        warehouse("WH-003", "Central Fulfillment", "Chicago, IL", "Michael Brown", 6500, 5900, 180),
        warehouse("WH-004", "Southern Distribution", "Atlanta, GA", "Emma Davis", 4500, 2800, 95),
        warehouse("WH-005", "West Coast Facility", "Los Angeles, CA", "James Martinez", 7500, 6300, 210),
    ]
}

fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    status: CustomerStatus,
    total_orders: u32,
    last_order_date: NaiveDate,
) -> Customer {
    Customer {
        id: CustomerId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        status,
        total_orders,
        last_order_date: Some(last_order_date),
    }
}

/// Five customers, `1` through `5`.
#[must_use]
pub fn customers() -> Vec<Customer> {
    use CustomerStatus::{Active, Inactive};

    vec![
        customer("1", "Alice Johnson", "alice@example.com", "(555) 123-4567", Active, 12, day(2023, 9, 15)),
        customer("2", "Bob Smith", "bob@example.com", "(555) 234-5678", Active, 8, day(2023, 10, 2)),
        customer("3", "Charlie Davis", "charlie@example.com", "(555) 345-6789", Inactive, 3, day(2023, 5, 20)),
        customer("4", "Diana Miller", "diana@example.com", "(555) 456-7890", Active, 16, day(2023, 10, 18)),
        customer("5", "Edward Wilson", "edward@example.com", "(555) 567-8901", Active, 5, day(2023, 9, 30)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn shipment(
    id: &str,
    tracking_number: &str,
    customer: &str,
    destination: &str,
    status: ShipmentStatus,
    items: u32,
    shipped_date: Option<NaiveDate>,
    delivery_date: NaiveDate,
) -> Shipment {
    Shipment {
        id: ShipmentId::new(id),
        tracking_number: tracking_number.to_string(),
        customer: customer.to_string(),
        destination: destination.to_string(),
        status,
        items,
        shipped_date,
        delivery_date,
    }
}

/// Four shipments, `1` through `4`.
#[must_use]
pub fn shipments() -> Vec<Shipment> {
    use ShipmentStatus::{Delivered, InTransit, Pending, Returned};

    vec![
        shipment("1", "SHP-12345", "Alice Johnson", "New York, NY", Delivered, 3, Some(day(2023, 9, 10)), day(2023, 9, 15)),
        shipment("2", "SHP-23456", "Bob Smith", "Los Angeles, CA", InTransit, 2, Some(day(2023, 10, 1)), day(2023, 10, 5)),
        shipment("3", "SHP-34567", "Charlie Davis", "Chicago, IL", Pending, 5, None, day(2023, 10, 25)),
        shipment("4", "SHP-45678", "Diana Miller", "Houston, TX", Returned, 1, Some(day(2023, 9, 20)), day(2023, 9, 28)),
    ]
}

/// One account per directory entry, ids `1` through `3`.
#[must_use]
pub fn user_accounts(directory: &StaticDirectory) -> Vec<UserAccount> {
    directory
        .entries()
        .iter()
        .map(|entry| UserAccount {
            id: entry.identity.id.clone(),
            name: entry.identity.name.clone(),
            email: entry.identity.email.clone(),
            role: entry.identity.role,
            avatar: entry.identity.avatar.clone(),
            password: entry.secret().clone(),
        })
        .collect()
}

/// Sales, order and inventory figures for one month of the reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyFigures {
    pub month: &'static str,
    pub sales: u32,
    pub orders: u32,
    pub inventory: u32,
}

const fn month(month: &'static str, sales: u32, orders: u32, inventory: u32) -> MonthlyFigures {
    MonthlyFigures {
        month,
        sales,
        orders,
        inventory,
    }
}

/// Reporting-year figures, January through December.
pub const MONTHLY_FIGURES: [MonthlyFigures; 12] = [
    month("Jan", 4000, 240, 2400),
    month("Feb", 3000, 198, 2210),
    month("Mar", 2000, 120, 2290),
    month("Apr", 2780, 190, 2000),
    month("May", 1890, 230, 2181),
    month("Jun", 2390, 310, 2500),
    month("Jul", 3490, 350, 2100),
    month("Aug", 4000, 400, 2400),
    month("Sep", 3800, 380, 2290),
    month("Oct", 4200, 420, 2300),
    month("Nov", 3950, 395, 2400),
    month("Dec", 5000, 500, 2500),
];

/// Total sales across the reporting year, in whole dollars.
#[must_use]
pub fn annual_sales() -> Price {
    Price::new(
        MONTHLY_FIGURES
            .iter()
            .map(|m| Decimal::from(m.sales))
            .sum(),
    )
}
