//! Validation and filtering system
//!
//! [`validate`] maps a draft to its field-level errors. It is synchronous,
//! total and free of side effects: the same draft always produces the same,
//! complete error map, and a draft is submittable iff that map is empty.

pub mod filters;
pub mod validators;

use crate::core::draft::{Draft, OrderItemDraft};
use crate::core::error::ValidationErrors;
use crate::core::field::FieldKind;
use crate::core::schema::{FieldSpec, ORDER_ITEMS, order_item_key};

/// Validate a draft against the schema of its resource
///
/// Fields that are fixed after creation are skipped for edit drafts. Order
/// drafts additionally require at least one item, with per-item errors keyed
/// `order_items.{index}.{field}`.
pub fn validate(draft: &Draft) -> ValidationErrors {
    let schema = draft.resource().schema();
    let mut errors = ValidationErrors::new();

    for spec in schema.fields_for(draft.mode()) {
        if let Err(message) = check_field(spec, draft.get(spec.name)) {
            errors.insert(spec.name, message);
        }
    }

    if schema.has_items {
        validate_items(draft.items(), &mut errors);
    }

    errors
}

/// Check a single field value against its definition
pub fn check_field(spec: &FieldSpec, value: &str) -> Result<(), String> {
    let label = spec.label;

    if spec.min_len > 0 {
        validators::min_length(spec.min_len)(label, value)?;
    }

    if value.trim().is_empty() {
        return match spec.kind {
            _ if !spec.required => Ok(()),
            FieldKind::Decimal | FieldKind::Integer { .. } | FieldKind::Reference(_) => {
                Err(format!("Valid {} is required", label.to_lowercase()))
            }
            _ => validators::required_text()(label, value),
        };
    }

    match spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email => validators::email()(label, value),
        FieldKind::Phone => validators::phone()(label, value),
        FieldKind::Url => validators::url()(label, value),
        FieldKind::Decimal => validators::positive_decimal()(label, value),
        FieldKind::Integer { min } => validators::integer_at_least(min)(label, value),
        FieldKind::Enum(allowed) => validators::one_of(allowed)(label, value),
        FieldKind::Date => validators::date()(label, value),
        FieldKind::Reference(_) => validators::reference()(label, value),
    }
}

fn validate_items(items: &[OrderItemDraft], errors: &mut ValidationErrors) {
    if items.is_empty() {
        errors.insert(ORDER_ITEMS, "At least one product is required");
        return;
    }

    for (index, item) in items.iter().enumerate() {
        let product = item.product_id.trim();
        if product.is_empty() {
            errors.insert(order_item_key(index, "product_id"), "Product is required");
        } else if let Err(message) = validators::reference()("Product", product) {
            errors.insert(order_item_key(index, "product_id"), message);
        }

        if let Err(message) = validators::integer_at_least(1)("Quantity", &item.quantity) {
            errors.insert(order_item_key(index, "quantity"), message);
        }
    }
}
