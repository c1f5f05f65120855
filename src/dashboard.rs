//! Dashboard aggregation over four resource lists
//!
//! Products, customers, orders and payments are fetched concurrently. A
//! failed list is logged and recorded in [`DashboardSnapshot::failures`];
//! the lists that did arrive are still reported.

use crate::core::error::{ClientError, ClientResult};
use crate::core::repository::Repository;
use crate::core::schema::Resource;
use crate::entities::{Customer, Order, OrderStatus, Payment, PaymentStatus, Product};
use crate::view::summary::{order_status_counts, payment_totals};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Number of orders and products shown in the recent/top panels
pub const PANEL_SIZE: usize = 5;

/// One list that could not be fetched
#[derive(Debug)]
pub struct DashboardFailure {
    pub resource: Resource,
    pub error: ClientError,
}

/// Everything the dashboard shows, with partial data on failure
#[derive(Debug, Default)]
pub struct DashboardSnapshot {
    pub products: Option<Vec<Product>>,
    pub customers: Option<Vec<Customer>>,
    pub orders: Option<Vec<Order>>,
    pub payments: Option<Vec<Payment>>,
    pub failures: Vec<DashboardFailure>,
}

impl DashboardSnapshot {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_products(&self) -> Option<usize> {
        self.products.as_ref().map(Vec::len)
    }

    pub fn total_customers(&self) -> Option<usize> {
        self.customers.as_ref().map(Vec::len)
    }

    pub fn total_orders(&self) -> Option<usize> {
        self.orders.as_ref().map(Vec::len)
    }

    pub fn total_payments(&self) -> Option<usize> {
        self.payments.as_ref().map(Vec::len)
    }

    /// First orders in API order
    pub fn recent_orders(&self) -> &[Order] {
        panel(self.orders.as_deref())
    }

    /// First products in API order
    pub fn top_products(&self) -> &[Product] {
        panel(self.products.as_deref())
    }

    pub fn order_status_counts(&self) -> Option<IndexMap<OrderStatus, usize>> {
        self.orders.as_deref().map(order_status_counts)
    }

    /// Sum of completed payments
    pub fn revenue(&self) -> Option<Decimal> {
        self.payments
            .as_deref()
            .map(|payments| payment_totals(payments)[&PaymentStatus::Completed])
    }
}

fn panel<T>(items: Option<&[T]>) -> &[T] {
    let items = items.unwrap_or_default();
    &items[..items.len().min(PANEL_SIZE)]
}

fn record<T>(
    resource: Resource,
    result: ClientResult<Vec<T>>,
    failures: &mut Vec<DashboardFailure>,
) -> Option<Vec<T>> {
    match result {
        Ok(items) => Some(items),
        Err(error) => {
            tracing::error!(%resource, %error, "Error fetching dashboard data");
            failures.push(DashboardFailure { resource, error });
            None
        }
    }
}

/// Fetch the four dashboard lists concurrently
pub async fn load_dashboard<P, C, O, Y>(
    products: &P,
    customers: &C,
    orders: &O,
    payments: &Y,
) -> DashboardSnapshot
where
    P: Repository<Product> + ?Sized,
    C: Repository<Customer> + ?Sized,
    O: Repository<Order> + ?Sized,
    Y: Repository<Payment> + ?Sized,
{
    let (products, customers, orders, payments) = futures::join!(
        products.list_all(),
        customers.list_all(),
        orders.list_all(),
        payments.list_all(),
    );

    let mut failures = Vec::new();
    let products = record(Resource::Product, products, &mut failures);
    let customers = record(Resource::Customer, customers, &mut failures);
    let orders = record(Resource::Order, orders, &mut failures);
    let payments = record(Resource::Payment, payments, &mut failures);

    DashboardSnapshot {
        products,
        customers,
        orders,
        payments,
        failures,
    }
}
