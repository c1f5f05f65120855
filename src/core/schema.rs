//! Declarative resource schemas
//!
//! Each of the six back-office resources is described once here: the fields a
//! form edits, their primitive kinds, whether they are required, whether they
//! are resubmitted on update, and their creation defaults. Validation, payload
//! building and the form controller all read from these tables.

use crate::core::field::FieldKind;
use crate::entities::{OrderStatus, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the resource types exposed by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Business,
    Category,
    Product,
    Customer,
    Order,
    Payment,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Business,
        Resource::Category,
        Resource::Product,
        Resource::Customer,
        Resource::Order,
        Resource::Payment,
    ];

    /// Path segment under `/api`
    ///
    /// The customer resource is served as `costumer` by the backend.
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Business => "business",
            Resource::Category => "category",
            Resource::Product => "product",
            Resource::Customer => "costumer",
            Resource::Order => "order",
            Resource::Payment => "payment",
        }
    }

    /// Lowercase singular name used in messages
    pub fn singular(self) -> &'static str {
        match self {
            Resource::Business => "business",
            Resource::Category => "category",
            Resource::Product => "product",
            Resource::Customer => "customer",
            Resource::Order => "order",
            Resource::Payment => "payment",
        }
    }

    /// Capitalized display name
    pub fn label(self) -> &'static str {
        match self {
            Resource::Business => "Business",
            Resource::Category => "Category",
            Resource::Product => "Product",
            Resource::Customer => "Customer",
            Resource::Order => "Order",
            Resource::Payment => "Payment",
        }
    }

    /// Schema describing the editable fields of this resource
    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            Resource::Business => &BUSINESS_SCHEMA,
            Resource::Category => &CATEGORY_SCHEMA,
            Resource::Product => &PRODUCT_SCHEMA,
            Resource::Customer => &CUSTOMER_SCHEMA,
            Resource::Order => &ORDER_SCHEMA,
            Resource::Payment => &PAYMENT_SCHEMA,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Whether a draft creates a new entity or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftMode {
    Create,
    Edit,
}

/// Value a field starts with when a create-mode draft is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    /// The current calendar date
    Today,
    Value(&'static str),
}

/// Definition of a single draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name, also the validation error key
    pub name: &'static str,
    /// Key used in request payloads
    pub wire: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Minimum trimmed length for text fields
    pub min_len: usize,
    /// `false` for fields that are fixed once the entity exists
    pub updatable: bool,
    pub default: FieldDefault,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire: name,
            label,
            kind,
            required: true,
            min_len: 0,
            updatable: true,
            default: FieldDefault::Empty,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    const fn wire(mut self, wire: &'static str) -> Self {
        self.wire = wire;
        self
    }

    const fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    const fn immutable(mut self) -> Self {
        self.updatable = false;
        self
    }

    const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Whether this field takes part in drafts of the given mode
    ///
    /// Immutable fields are neither validated nor sent when editing.
    pub fn applies_to(&self, mode: DraftMode) -> bool {
        self.updatable || mode == DraftMode::Create
    }
}

/// Field table for one resource
#[derive(Debug)]
pub struct ResourceSchema {
    pub resource: Resource,
    pub fields: &'static [FieldSpec],
    /// Whether drafts carry an ordered list of order items
    pub has_items: bool,
}

impl ResourceSchema {
    /// Look up a field definition by canonical name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Fields sent in payloads for the given mode
    pub fn fields_for(&self, mode: DraftMode) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(move |spec| spec.applies_to(mode))
    }

    /// Names of required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
    }
}

/// Error key for the order item collection as a whole
pub const ORDER_ITEMS: &str = "order_items";

/// Error key for a field of one order item
pub fn order_item_key(index: usize, field: &str) -> String {
    format!("{}.{}.{}", ORDER_ITEMS, index, field)
}

static BUSINESS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Business,
    fields: &[
        FieldSpec::new("name", "Business name", FieldKind::Text),
        FieldSpec::new("email", "Email", FieldKind::Email),
        FieldSpec::new("username", "Username", FieldKind::Text),
        FieldSpec::new("address", "Address", FieldKind::Text).optional(),
        FieldSpec::new("logo", "Logo", FieldKind::Text).optional(),
        FieldSpec::new("website", "Website", FieldKind::Url).optional(),
        FieldSpec::new("phone_number", "Phone number", FieldKind::Phone).optional(),
    ],
    has_items: false,
};

static CATEGORY_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Category,
    fields: &[
        FieldSpec::new("name", "Category name", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Text).optional(),
    ],
    has_items: false,
};

static PRODUCT_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Product,
    fields: &[
        FieldSpec::new("name", "Product name", FieldKind::Text),
        FieldSpec::new("description", "Product description", FieldKind::Text),
        FieldSpec::new("image", "Image URL", FieldKind::Text).optional(),
        FieldSpec::new("price", "Price", FieldKind::Decimal),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer { min: 0 }),
        FieldSpec::new(
            "category_id",
            "Category",
            FieldKind::Reference(Resource::Category),
        ),
        FieldSpec::new(
            "business_id",
            "Business",
            FieldKind::Reference(Resource::Business),
        )
        .immutable(),
    ],
    has_items: false,
};

static CUSTOMER_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Customer,
    fields: &[
        FieldSpec::new("first_name", "First name", FieldKind::Text),
        FieldSpec::new("last_name", "Last name", FieldKind::Text),
        FieldSpec::new("username", "Username", FieldKind::Text),
        FieldSpec::new("email", "Email", FieldKind::Email),
        FieldSpec::new("phone_number", "Phone number", FieldKind::Phone).optional(),
        FieldSpec::new("address", "Address", FieldKind::Text).optional(),
    ],
    has_items: false,
};

static ORDER_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Order,
    fields: &[
        FieldSpec::new(
            "customer_id",
            "Customer",
            FieldKind::Reference(Resource::Customer),
        )
        .wire("costumer_id"),
        FieldSpec::new(
            "order_status",
            "Order status",
            FieldKind::Enum(OrderStatus::NAMES),
        )
        .with_default(FieldDefault::Value("PENDING")),
    ],
    has_items: true,
};

static PAYMENT_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Payment,
    fields: &[
        FieldSpec::new("payment_date", "Payment date", FieldKind::Date)
            .with_default(FieldDefault::Today),
        FieldSpec::new("amount", "Amount", FieldKind::Decimal),
        FieldSpec::new(
            "payment_method",
            "Payment method",
            FieldKind::Enum(PaymentMethod::NAMES),
        ),
        FieldSpec::new(
            "payment_status",
            "Payment status",
            FieldKind::Enum(PaymentStatus::NAMES),
        )
        .with_default(FieldDefault::Value("PENDING")),
        FieldSpec::new("transaction_id", "Transaction ID", FieldKind::Text).min_len(3),
        FieldSpec::new(
            "customer_id",
            "Customer",
            FieldKind::Reference(Resource::Customer),
        ),
    ],
    has_items: false,
};
