#![cfg(feature = "import")]

use chrono::NaiveDate;
use faktura_vat::calculation::*;
use faktura_vat::core::*;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;

const OCTAVIA: &str = include_str!("fixtures/calculation_octavia.json");

fn octavia() -> CalculationImport {
    parse_calculation_str(OCTAVIA).unwrap()
}

fn names(import: &CalculationImport) -> Vec<&str> {
    import.items.iter().map(|i| i.name.as_str()).collect()
}

// --- Full export ---

#[test]
fn services_come_before_parts() {
    assert_eq!(
        names(&octavia()),
        vec![
            "Robocizna",
            "Koszty dodatkowe",
            "Lakierowanie",
            "ZDERZAK PRZEDNI",
            "123456",
            "Część",
            "Materiały dodatkowe",
        ]
    );
}

#[test]
fn labor_uses_hours_from_composits() {
    let labor = &octavia().items[0];
    assert_eq!(labor.quantity, dec!(3.5));
    assert_eq!(labor.unit_of_measure, "h");
    assert_eq!(labor.unit_net_price, dec!(150));
    assert_eq!(labor.vat_rate_percent, dec!(23));
}

#[test]
fn additional_costs_are_a_single_service() {
    let extra = &octavia().items[1];
    assert_eq!(extra.quantity, dec!(1));
    assert_eq!(extra.unit_of_measure, "usł");
    assert_eq!(extra.unit_net_price, dec!(120));
}

#[test]
fn painting_price_is_rounded_per_hour() {
    let paint = &octavia().items[2];
    assert_eq!(paint.quantity, dec!(2.4));
    // 864.99 / 2.4 = 360.4125
    assert_eq!(paint.unit_net_price, dec!(360.41));
    assert_eq!(item_amounts(paint).net, dec!(864.98));
}

#[test]
fn spare_parts_keep_codes_and_units() {
    let import = octavia();
    let bumper = &import.items[3];
    assert_eq!(bumper.code.as_deref(), Some("5E0807221"));
    assert_eq!(bumper.classification_code.as_deref(), Some("E"));
    assert_eq!(bumper.unit_net_price, dec!(1250.40));
    assert_eq!(bumper.unit_of_measure, "szt");

    let numbered = &import.items[4];
    assert_eq!(numbered.code.as_deref(), Some("123456"));
    assert_eq!(numbered.quantity, dec!(2));
    assert_eq!(numbered.unit_of_measure, "kpl");
    assert_eq!(numbered.unit_net_price, dec!(150));

    let anonymous = &import.items[5];
    assert_eq!(anonymous.quantity, dec!(1));
    assert_eq!(anonymous.unit_net_price, dec!(45.50));
    assert_eq!(anonymous.code, None);
}

#[test]
fn sundry_materials_come_last() {
    let import = octavia();
    let sundry = import_last(&import);
    assert_eq!(sundry.unit_net_price, dec!(37.52));
    assert_eq!(sundry.unit_of_measure, "usł");
}

fn import_last(import: &CalculationImport) -> &InvoiceItem {
    import.items.last().unwrap()
}

#[test]
fn metadata_is_cleaned() {
    let import = octavia();
    assert_eq!(import.claim_number.as_deref(), Some("2024/06/ 0153"));
    assert_eq!(import.invoice_number.as_deref(), Some("AUDATEX/2024/06/0153"));
    assert_eq!(import.vehicle.as_deref(), Some("SKODA OCTAVIA III KOMBI WX 1234A"));
    assert_eq!(
        import.document_notes.as_deref(),
        Some("Źródło kalkulacji: AudaPad Web\nPunkty uszkodzeń: 01 02")
    );
    assert_eq!(import.vat_rate, dec!(23));
}

#[test]
fn imported_items_have_no_overrides() {
    for item in octavia().items {
        assert_eq!((item.net, item.vat, item.gross), (None, None, None));
    }
}

// --- Shapes and fallbacks ---

#[test]
fn single_object_payload() {
    let import = parse_calculation(&json!({
        "Calculation": {"FinalCalc": {"FCAdditionalCost": {"Tot": 99.999}}}
    }))
    .unwrap();
    assert_eq!(import.items.len(), 1);
    assert_eq!(import.items[0].unit_net_price, dec!(100.00));
    assert_eq!(import.claim_number, None);
    assert_eq!(import.invoice_number, None);
    assert_eq!(import.vehicle, None);
    assert_eq!(import.document_notes, None);
}

#[test]
fn vat_rate_from_tax_list() {
    let import = parse_calculation(&json!([{
        "Calculation": {"FinalCalc": {
            "FCAdditionalCost": {"Tot": 100},
            "GrandTotal": {"Taxes": {"Tax": [{"PC": {"Val": "8"}}, {"PC": {"Val": 23}}]}}
        }}
    }]))
    .unwrap();
    assert_eq!(import.vat_rate, dec!(8));
    assert_eq!(import.items[0].vat_rate_percent, dec!(8));
}

#[test]
fn labor_results_take_precedence() {
    let import = parse_calculation(&json!({
        "Calculation": {
            "Labor": {"PartComposits": {"PartComposit": {"WuNetHrNo": {"Val": 9}}}},
            "FinalCalc": {"FCLabor": {
                "Tot": "300",
                "LaborRates": {"LaborResults": {"HrNo": {"Val": 2, "Unit": "RG"}}}
            }}
        }
    }))
    .unwrap();
    let labor = &import.items[0];
    assert_eq!(labor.quantity, dec!(2));
    assert_eq!(labor.unit_of_measure, "RG");
    assert_eq!(labor.unit_net_price, dec!(150));
}

#[test]
fn non_positive_totals_are_skipped() {
    let import = parse_calculation(&json!({
        "Calculation": {"FinalCalc": {
            "FCLabor": {"Tot": -50},
            "FCAdditionalCost": {"Tot": "0,004"},
            "FCPaint": {"PaintTotOverAll": "abc"},
            "FCPart": {"FCSundry": {"PCofParts": {"PCofPart": {"Amnt": 10}}}}
        }}
    }))
    .unwrap();
    assert_eq!(names(&import), vec!["Materiały dodatkowe"]);
}

// --- Fatal errors ---

#[test]
fn fatal_errors() {
    assert!(matches!(parse_calculation_str("{not json"), Err(ImportError::Json(_))));
    assert_eq!(parse_calculation(&json!([])), Err(ImportError::InvalidFormat));
    assert_eq!(parse_calculation(&json!(["x"])), Err(ImportError::InvalidFormat));
    assert_eq!(parse_calculation(&json!(42)), Err(ImportError::InvalidFormat));
    assert_eq!(
        parse_calculation(&json!({"ClaimID": "1"})),
        Err(ImportError::MissingCalculation)
    );
    assert_eq!(
        parse_calculation(&json!({"Calculation": null})),
        Err(ImportError::MissingCalculation)
    );
    assert_eq!(
        parse_calculation(&json!({"Calculation": {"SpareParts": {}}})),
        Err(ImportError::NoImportableItems)
    );
}

#[test]
fn error_messages_are_user_facing() {
    assert_eq!(ImportError::InvalidFormat.to_string(), "invalid calculation data format");
    assert_eq!(ImportError::MissingCalculation.to_string(), "missing Calculation section");
    assert_eq!(ImportError::NoImportableItems.to_string(), "no importable line items found");
}

// --- Applying to a draft ---

fn party(name: &str) -> Party {
    PartyBuilder::new(name, "5260250274", "ul. Polna 3", "00-625 Warszawa").build()
}

#[test]
fn apply_to_blank_draft() {
    let base = InvoiceDraftBuilder::new("", NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
        .issue_place("Warszawa")
        .seller(party("Warsztat"))
        .buyer(party("Klient"))
        .document_notes("Naprawa powypadkowa")
        .build_draft()
        .unwrap();

    let draft = octavia().apply_to(&base);
    assert_eq!(draft.invoice_number, "AUDATEX/2024/06/0153");
    assert_eq!(draft.items.len(), 7);
    assert_eq!(draft.claim_number.as_deref(), Some("2024/06/ 0153"));
    assert_eq!(
        draft.document_notes.as_deref(),
        Some("Naprawa powypadkowa\nŹródło kalkulacji: AudaPad Web\nPunkty uszkodzeń: 01 02")
    );
    assert!(validate_draft(&draft).is_empty());

    let calculated = compute_totals(&draft);
    // 525 + 120 + 864.98 + 1250.40 + 300 + 45.50 + 37.52
    assert_eq!(calculated.totals.net, dec!(3143.40));
    assert_eq!(calculated.vat_summary.len(), 1);
}

#[test]
fn apply_to_keeps_existing_number() {
    let base = InvoiceDraftBuilder::new("FV/99/2024", NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
        .issue_place("Warszawa")
        .seller(party("Warsztat"))
        .buyer(party("Klient"))
        .build_draft()
        .unwrap();
    assert_eq!(octavia().apply_to(&base).invoice_number, "FV/99/2024");
}
