//! Status counts and totals for the list summary panels

use crate::entities::{Order, OrderStatus, Payment, PaymentStatus};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::hash::Hash;

/// Count items per status, listing every status in declaration order
pub fn status_counts<T, S>(
    items: &[T],
    all: &[S],
    status_of: impl Fn(&T) -> S,
) -> IndexMap<S, usize>
where
    S: Copy + Eq + Hash,
{
    let mut counts: IndexMap<S, usize> = all.iter().map(|status| (*status, 0)).collect();
    for item in items {
        *counts.entry(status_of(item)).or_insert(0) += 1;
    }
    counts
}

pub fn order_status_counts(orders: &[Order]) -> IndexMap<OrderStatus, usize> {
    status_counts(orders, OrderStatus::ALL, |order| order.order_status)
}

pub fn payment_status_counts(payments: &[Payment]) -> IndexMap<PaymentStatus, usize> {
    status_counts(payments, PaymentStatus::ALL, |payment| payment.payment_status)
}

/// Sum of payment amounts per status
pub fn payment_totals(payments: &[Payment]) -> IndexMap<PaymentStatus, Decimal> {
    let mut totals: IndexMap<PaymentStatus, Decimal> = PaymentStatus::ALL
        .iter()
        .map(|status| (*status, Decimal::ZERO))
        .collect();
    for payment in payments {
        *totals.entry(payment.payment_status).or_insert(Decimal::ZERO) += payment.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::AdminEntity;
    use serde_json::json;

    fn payment(id: i64, amount: &str, status: &str) -> Payment {
        Payment::from_api(json!({
            "id": id,
            "payment_date": "2024-01-01",
            "amount": amount,
            "payment_method": "PAYPAL",
            "payment_status": status,
            "transaction_id": format!("TX-{}", id),
            "customer_id": 1,
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_include_every_status() {
        let payments = vec![
            payment(1, "10.00", "COMPLETED"),
            payment(2, "5.50", "COMPLETED"),
            payment(3, "3.00", "FAILED"),
        ];
        let counts = payment_status_counts(&payments);
        assert_eq!(counts.len(), PaymentStatus::ALL.len());
        assert_eq!(counts[&PaymentStatus::Completed], 2);
        assert_eq!(counts[&PaymentStatus::Pending], 0);

        let totals = payment_totals(&payments);
        assert_eq!(totals[&PaymentStatus::Completed].to_string(), "15.50");
    }

    #[test]
    fn test_order_counts_empty() {
        let counts = order_status_counts(&[]);
        assert!(counts.values().all(|count| *count == 0));
        assert_eq!(counts.keys().next(), Some(&OrderStatus::Pending));
    }
}
