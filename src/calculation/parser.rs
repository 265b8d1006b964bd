use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::error::ImportError;
use super::lookup::Node;
use crate::core::money::round_currency;
use crate::core::numbering::invoice_number_from_claim;
use crate::core::{InvoiceDraft, InvoiceItem, STANDARD_VAT_RATE};

pub const LABOR_LABEL: &str = "Robocizna";
pub const ADDITIONAL_COSTS_LABEL: &str = "Koszty dodatkowe";
pub const PAINTING_LABEL: &str = "Lakierowanie";
pub const SUNDRY_LABEL: &str = "Materiały dodatkowe";
/// Name of a spare part with neither description nor part number.
pub const PART_FALLBACK_LABEL: &str = "Część";

pub const UNIT_PIECE: &str = "szt";
pub const UNIT_SERVICE: &str = "usł";
pub const UNIT_HOUR: &str = "h";

/// Line items and metadata extracted from a calculation export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationImport {
    /// Services first (labor, additional costs, painting), then parts
    /// (spare parts, sundry materials).
    pub items: Vec<InvoiceItem>,
    pub claim_number: Option<String>,
    /// Manufacturer, model and plate, space-joined.
    pub vehicle: Option<String>,
    pub document_notes: Option<String>,
    /// Invoice number derived from the claim number.
    pub invoice_number: Option<String>,
    /// VAT rate applied to every item.
    pub vat_rate: Decimal,
}

impl CalculationImport {
    /// Apply the import to an existing draft: items are replaced, claim and
    /// vehicle are set when found, notes are appended. The suggested invoice
    /// number is used only when the draft has none yet.
    pub fn apply_to(&self, base: &InvoiceDraft) -> InvoiceDraft {
        let mut draft = base.clone();
        draft.items = self.items.clone();

        if let Some(claim) = &self.claim_number {
            draft.claim_number = Some(claim.clone());
        }
        if let Some(vehicle) = &self.vehicle {
            draft.vehicle = Some(vehicle.clone());
        }
        if let Some(notes) = &self.document_notes {
            draft.document_notes = Some(match draft.document_notes.take() {
                Some(existing) if !existing.is_empty() => format!("{existing}\n{notes}"),
                _ => notes.clone(),
            });
        }
        if draft.invoice_number.trim().is_empty() {
            if let Some(number) = &self.invoice_number {
                draft.invoice_number = number.clone();
            }
        }

        draft
    }
}

/// Parse a calculation export from JSON text.
pub fn parse_calculation_str(json: &str) -> Result<CalculationImport, ImportError> {
    let payload: Value =
        serde_json::from_str(json).map_err(|e| ImportError::Json(e.to_string()))?;
    parse_calculation(&payload)
}

/// Convert a calculation export into draft invoice items plus metadata.
///
/// The payload may be a single object or an array, of which only the first
/// entry is read.
///
/// # Errors
///
/// - [`ImportError::InvalidFormat`] when the first entry is not an object,
/// - [`ImportError::MissingCalculation`] when it has no `Calculation` section,
/// - [`ImportError::NoImportableItems`] when nothing billable was found.
pub fn parse_calculation(payload: &Value) -> Result<CalculationImport, ImportError> {
    let entry = match payload {
        Value::Array(entries) => entries.first(),
        other => Some(other),
    }
    .filter(|v| v.is_object())
    .ok_or(ImportError::InvalidFormat)?;

    let root = Node::new(entry);
    let calculation = root.get("Calculation");
    if !calculation.is_truthy() {
        return Err(ImportError::MissingCalculation);
    }

    let final_calc = calculation.get("FinalCalc");
    let vat_rate = resolve_vat_rate(final_calc);

    let mut items = Vec::new();
    items.extend(labor_item(calculation, final_calc, vat_rate));
    items.extend(service_item(
        ADDITIONAL_COSTS_LABEL,
        final_calc.at(&["FCAdditionalCost", "Tot"]).currency(),
        None,
        None,
        vat_rate,
    ));
    items.extend(painting_item(calculation, final_calc, vat_rate));
    items.extend(spare_part_items(calculation, vat_rate));
    items.extend(service_item(
        SUNDRY_LABEL,
        final_calc
            .at(&["FCPart", "FCSundry", "PCofParts", "PCofPart", "Amnt"])
            .currency(),
        None,
        None,
        vat_rate,
    ));

    if items.is_empty() {
        debug!("calculation export carried no billable amounts");
        return Err(ImportError::NoImportableItems);
    }

    let claim_number = root.get("ClaimID").clean_text();
    let vehicle = vehicle_description(root.get("Vehicle"));
    let document_notes = document_notes(calculation, root.get("Vehicle"));
    let invoice_number = claim_number.as_deref().map(invoice_number_from_claim);

    info!(
        items = items.len(),
        %vat_rate,
        claim_number = claim_number.as_deref().unwrap_or("-"),
        "imported calculation export"
    );

    Ok(CalculationImport {
        items,
        claim_number,
        vehicle,
        document_notes,
        invoice_number,
        vat_rate,
    })
}

fn resolve_vat_rate(final_calc: Node<'_>) -> Decimal {
    let grand_total = final_calc.get("GrandTotal");
    let rate = grand_total
        .at(&["TaxPC", "Val"])
        .number()
        .or_else(|| grand_total.at(&["Taxes", "Tax"]).first().at(&["PC", "Val"]).number())
        .unwrap_or(STANDARD_VAT_RATE);
    round_currency(rate)
}

fn labor_item(calculation: Node<'_>, final_calc: Node<'_>, vat_rate: Decimal) -> Option<InvoiceItem> {
    let labor = final_calc.get("FCLabor");
    let results = labor.at(&["LaborRates", "LaborResults"]);
    let first = results
        .or(calculation.at(&["Labor", "PartComposits", "PartComposit"]))
        .first();

    let hours = first
        .get("HrNo")
        .number()
        .or_else(|| first.get("WuNetHrNo").number())
        .or_else(|| results.get("HrNo").number());
    let unit = first
        .at(&["HrNo", "Unit"])
        .text()
        .or_else(|| first.at(&["WuNetHrNo", "Unit"]).text())
        .unwrap_or(UNIT_HOUR);

    service_item(
        LABOR_LABEL,
        labor.get("Tot").currency(),
        hours,
        Some(unit),
        vat_rate,
    )
}

fn painting_item(calculation: Node<'_>, final_calc: Node<'_>, vat_rate: Decimal) -> Option<InvoiceItem> {
    let paint = calculation.get("Paint");
    let standard = paint.at(&["PaintTotLbr", "TotStd"]);
    let preparation = paint.at(&["PaintPreparations", "PntPrep"]).first().get("HrNo");

    let hours = standard.number().or_else(|| preparation.number());
    let unit = standard
        .get("Unit")
        .text()
        .or_else(|| preparation.get("Unit").text())
        .unwrap_or(UNIT_HOUR);

    service_item(
        PAINTING_LABEL,
        final_calc.at(&["FCPaint", "PaintTotOverAll"]).currency(),
        hours,
        Some(unit),
        vat_rate,
    )
}

fn spare_part_items(calculation: Node<'_>, vat_rate: Decimal) -> Vec<InvoiceItem> {
    calculation
        .at(&["SpareParts", "PartDtls", "PartDtl"])
        .list()
        .into_iter()
        .filter_map(|part| {
            let total = part.get("Price").currency();
            if total <= Decimal::ZERO {
                return None;
            }

            let quantity = part
                .get("Qty")
                .number()
                .filter(|q| *q > Decimal::ZERO)
                .unwrap_or(Decimal::ONE);
            let unit = part.at(&["Qty", "Unit"]).text().unwrap_or(UNIT_PIECE);
            let part_number = part.get("PartNo").display_text();
            let name = part
                .get("PartDesc")
                .display_text()
                .or_else(|| part_number.clone())
                .unwrap_or_else(|| PART_FALLBACK_LABEL.to_string());

            Some(line_item(
                name,
                part_number,
                part.get("RepTyp").display_text(),
                quantity,
                unit,
                per_unit(total, quantity),
                vat_rate,
            ))
        })
        .collect()
}

/// Single service line for a calculation total; `None` unless the rounded
/// total is positive.
fn service_item(
    name: &str,
    amount: Decimal,
    quantity: Option<Decimal>,
    unit: Option<&str>,
    vat_rate: Decimal,
) -> Option<InvoiceItem> {
    let total = round_currency(amount);
    if total <= Decimal::ZERO {
        return None;
    }
    let quantity = quantity
        .filter(|q| *q > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);
    Some(line_item(
        name.to_string(),
        None,
        None,
        quantity,
        unit.unwrap_or(UNIT_SERVICE),
        per_unit(total, quantity),
        vat_rate,
    ))
}

/// `total / quantity`; zero when the quotient does not fit a decimal.
fn per_unit(total: Decimal, quantity: Decimal) -> Decimal {
    total.checked_div(quantity).unwrap_or(Decimal::ZERO)
}

fn line_item(
    name: String,
    code: Option<String>,
    classification_code: Option<String>,
    quantity: Decimal,
    unit: &str,
    unit_net_price: Decimal,
    vat_rate: Decimal,
) -> InvoiceItem {
    InvoiceItem {
        name,
        code,
        classification_code,
        quantity: round_currency(quantity),
        unit_of_measure: unit.to_string(),
        unit_net_price: round_currency(unit_net_price),
        vat_rate_percent: round_currency(vat_rate),
        net: None,
        vat: None,
        gross: None,
    }
}

fn vehicle_description(vehicle: Node<'_>) -> Option<String> {
    let identification = vehicle.get("VehicleIdentification");
    let model = identification
        .get("SubModelName")
        .clean_text()
        .or_else(|| identification.get("ModelName").clean_text());

    let parts: Vec<String> = [
        identification.get("ManufacturerName").clean_text(),
        model,
        vehicle.at(&["VehicleAdmin", "PlateNumber"]).clean_text(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn document_notes(calculation: Node<'_>, vehicle: Node<'_>) -> Option<String> {
    let mut notes = Vec::new();

    if let Some(run) = calculation.get("RunDesc").display_text() {
        notes.push(format!("Źródło kalkulacji: {run}"));
    }
    if let Some(points) = vehicle.at(&["VehicleDamage", "DamagePoints"]).clean_text() {
        notes.push(format!("Punkty uszkodzeń: {points}"));
    }

    if notes.is_empty() {
        None
    } else {
        Some(notes.join("\n"))
    }
}
