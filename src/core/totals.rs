use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::money::{MAX_AMOUNT, amount_in_range, round_currency, sum_cents};
use super::types::*;

/// Rounded net/VAT/gross of one item, honouring explicit overrides.
///
/// - `net`: override, else `quantity * unit_net_price`.
/// - `vat`: override; else `gross - net` when both of those were given;
///   else `net * rate / 100`.
/// - `gross`: override, else `net + vat`.
///
/// Each value is rounded to currency precision on its own, and derived values
/// are computed from already rounded inputs, so without overrides
/// `net + vat == gross` holds exactly.
///
/// Arithmetic saturates at the decimal range; [`checked_item_amounts`] tells
/// such results apart.
pub fn item_amounts(item: &InvoiceItem) -> ItemAmounts {
    let net = round_currency(
        item.net
            .unwrap_or_else(|| item.quantity.saturating_mul(item.unit_net_price)),
    );

    let vat = match (item.vat, item.net, item.gross) {
        (Some(vat), _, _) => vat,
        (None, Some(net), Some(gross)) => gross.saturating_sub(net),
        _ => net.saturating_mul(item.vat_rate_percent) / dec!(100),
    };
    let vat = round_currency(vat);

    let gross = round_currency(item.gross.unwrap_or_else(|| net.saturating_add(vat)));

    ItemAmounts { net, vat, gross }
}

/// [`item_amounts`], or `None` when any amount exceeds [`MAX_AMOUNT`].
pub fn checked_item_amounts(item: &InvoiceItem) -> Option<ItemAmounts> {
    let amounts = item_amounts(item);
    [amounts.net, amounts.vat, amounts.gross]
        .into_iter()
        .all(amount_in_range)
        .then_some(amounts)
}

/// Compute per-item amounts, the VAT summary and grand totals.
///
/// Pure and deterministic. The returned draft carries the computed amounts as
/// item overrides, so feeding it back in yields the same result.
///
/// ```
/// use faktura_vat::core::*;
/// use rust_decimal_macros::dec;
///
/// let item = InvoiceItemBuilder::new("Robocizna", dec!(2.5), "h", dec!(180)).build();
/// let amounts = item_amounts(&item);
/// assert_eq!(amounts.net, dec!(450.00));
/// assert_eq!(amounts.vat, dec!(103.50));
/// assert_eq!(amounts.gross, dec!(553.50));
/// ```
pub fn compute_totals(draft: &InvoiceDraft) -> CalculatedInvoice {
    let mut draft = draft.clone();
    let mut summary: BTreeMap<Decimal, ItemAmounts> = BTreeMap::new();

    for item in &mut draft.items {
        let amounts = item_amounts(item);
        item.net = Some(amounts.net);
        item.vat = Some(amounts.vat);
        item.gross = Some(amounts.gross);

        let row = summary
            .entry(item.vat_rate_percent.normalize())
            .or_insert(ItemAmounts {
                net: Decimal::ZERO,
                vat: Decimal::ZERO,
                gross: Decimal::ZERO,
            });
        row.net = round_currency(row.net.saturating_add(amounts.net));
        row.vat = round_currency(row.vat.saturating_add(amounts.vat));
        row.gross = round_currency(row.gross.saturating_add(amounts.gross));
    }

    let vat_summary = summary
        .into_iter()
        .filter(|(_, row)| row.net > Decimal::ZERO)
        .map(|(rate, row)| VatSummaryRow {
            rate,
            net: row.net,
            vat: row.vat,
            gross: row.gross,
        })
        .collect();

    let totals = grand_totals(&draft.items);

    CalculatedInvoice {
        draft,
        vat_summary,
        totals,
    }
}

/// Grand totals summed in integer cents over the items' rounded amounts.
pub fn grand_totals(items: &[InvoiceItem]) -> Totals {
    let amounts: Vec<ItemAmounts> = items.iter().map(item_amounts).collect();
    Totals {
        net: sum_cents(amounts.iter().map(|a| a.net)),
        vat: sum_cents(amounts.iter().map(|a| a.vat)),
        gross: sum_cents(amounts.iter().map(|a| a.gross)),
    }
}
