//! Order and payment status enumerations

use crate::closed_enum;

closed_enum!(
    /// Lifecycle state of an order
    OrderStatus, "order status" {
        Pending => "PENDING", "Pending",
        Processing => "PROCESSING", "Processing",
        Shipped => "SHIPPED", "Shipped",
        Delivered => "DELIVERED", "Delivered",
        Cancelled => "CANCELLED", "Cancelled",
    }
);

closed_enum!(
    /// How a payment was made
    PaymentMethod, "payment method" {
        CreditCard => "CREDIT_CARD", "Credit card",
        Paypal => "PAYPAL", "PayPal",
        BankTransfer => "BANK_TRANSFER", "Bank transfer",
        CashOnDelivery => "CASH_ON_DELIVERY", "Cash on delivery",
    }
);

closed_enum!(
    /// Settlement state of a payment
    PaymentStatus, "payment status" {
        Pending => "PENDING", "Pending",
        Completed => "COMPLETED", "Completed",
        Failed => "FAILED", "Failed",
        Refunded => "REFUNDED", "Refunded",
    }
);

/// Presentation-neutral emphasis for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Warning,
    Info,
    Accent,
    Success,
    Danger,
    Neutral,
}

impl OrderStatus {
    pub fn tone(&self) -> Tone {
        match self {
            OrderStatus::Pending => Tone::Warning,
            OrderStatus::Processing => Tone::Info,
            OrderStatus::Shipped => Tone::Accent,
            OrderStatus::Delivered => Tone::Success,
            OrderStatus::Cancelled => Tone::Danger,
        }
    }

    /// Whether the order can still change
    pub fn is_open(&self) -> bool {
        match self {
            OrderStatus::Pending | OrderStatus::Processing | OrderStatus::Shipped => true,
            OrderStatus::Delivered | OrderStatus::Cancelled => false,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl PaymentStatus {
    pub fn tone(&self) -> Tone {
        match self {
            PaymentStatus::Pending => Tone::Warning,
            PaymentStatus::Completed => Tone::Success,
            PaymentStatus::Failed => Tone::Danger,
            PaymentStatus::Refunded => Tone::Neutral,
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        assert_eq!(
            OrderStatus::NAMES,
            &["PENDING", "PROCESSING", "SHIPPED", "DELIVERED", "CANCELLED"]
        );
        assert_eq!(
            "CANCELLED".parse::<OrderStatus>().unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_payment_method_round_trip_through_wire_name() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), *method);
        }
        assert!("CHEQUE".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_tones() {
        assert_eq!(OrderStatus::Delivered.tone(), Tone::Success);
        assert_eq!(OrderStatus::Cancelled.tone(), Tone::Danger);
        assert_eq!(PaymentStatus::Refunded.tone(), Tone::Neutral);
        assert_eq!(PaymentStatus::Pending.tone(), Tone::Warning);
    }

    #[test]
    fn test_defaults_are_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert!(OrderStatus::Shipped.is_open());
        assert!(!OrderStatus::Delivered.is_open());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentMethod::Paypal.label(), "PayPal");
        assert_eq!(PaymentMethod::CashOnDelivery.label(), "Cash on delivery");
    }
}
