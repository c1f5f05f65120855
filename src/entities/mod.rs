//! Canonical entity shapes for the six back-office resources

pub mod macros;
pub mod normalize;
pub mod status;

mod business;
mod category;
mod customer;
mod order;
mod payment;
mod product;

pub use business::Business;
pub use category::Category;
pub use customer::{Customer, CustomerSummary};
pub use order::{Order, OrderItem};
pub use payment::Payment;
pub use product::Product;
pub use status::{OrderStatus, PaymentMethod, PaymentStatus, Tone};
