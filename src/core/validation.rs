use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::money::{MAX_AMOUNT, amount_in_range};
use super::totals::checked_item_amounts;
use super::types::*;

/// Validate a draft before it is persisted.
/// Returns all validation errors found (not just the first).
pub fn validate_draft(draft: &InvoiceDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_text(&draft.invoice_number, "invoice_number", "invoice number is required", &mut errors);
    require_text(&draft.issue_place, "issue_place", "issue place is required", &mut errors);

    validate_party(&draft.seller, "seller", &mut errors);
    validate_party(&draft.buyer, "buyer", &mut errors);

    if draft.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "at least one line item is required",
        ));
    }

    let mut total_gross = Decimal::ZERO;
    for (i, item) in draft.items.iter().enumerate() {
        if let Some(gross) = validate_item(item, i, &mut errors) {
            total_gross = total_gross.saturating_add(gross);
        }
    }

    if !amount_in_range(total_gross) {
        errors.push(ValidationError::new(
            "items",
            format!("invoice total exceeds {MAX_AMOUNT}"),
        ));
    }

    errors
}

fn validate_party(party: &Party, prefix: &str, errors: &mut Vec<ValidationError>) {
    require_text(&party.name, &format!("{prefix}.name"), "name is required", errors);
    require_text(&party.tax_id, &format!("{prefix}.tax_id"), "NIP is required", errors);
    require_text(
        &party.address_line_1,
        &format!("{prefix}.address_line_1"),
        "address is required",
        errors,
    );
    require_text(
        &party.address_line_2,
        &format!("{prefix}.address_line_2"),
        "address is required",
        errors,
    );
}

/// Returns the item's gross when its amounts are within range.
fn validate_item(
    item: &InvoiceItem,
    index: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<Decimal> {
    let prefix = format!("items.{index}");

    require_text(&item.name, &format!("{prefix}.name"), "item name is required", errors);
    require_text(
        &item.unit_of_measure,
        &format!("{prefix}.unit_of_measure"),
        "unit of measure is required",
        errors,
    );

    if item.quantity < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must not be negative",
        ));
    }

    if item.unit_net_price < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_net_price"),
            "unit net price must not be negative",
        ));
    }

    if item.vat_rate_percent < Decimal::ZERO || item.vat_rate_percent > dec!(100) {
        errors.push(ValidationError::new(
            format!("{prefix}.vat_rate_percent"),
            format!(
                "VAT rate {} must be between 0 and 100",
                item.vat_rate_percent
            ),
        ));
    }

    let Some(amounts) = checked_item_amounts(item) else {
        errors.push(ValidationError::new(
            format!("{prefix}.net"),
            format!("amount out of range (at most {MAX_AMOUNT})"),
        ));
        return None;
    };

    if amounts.net + amounts.vat != amounts.gross {
        errors.push(ValidationError::new(
            format!("{prefix}.gross"),
            format!(
                "gross {} does not match net {} + VAT {}",
                amounts.gross, amounts.net, amounts.vat
            ),
        ));
    }
    Some(amounts.gross)
}

fn require_text(value: &str, field: &str, message: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, message));
    }
}
