use chrono::NaiveDate;
use faktura_vat::core::*;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new(
        "Auto Serwis Kowalczyk Sp. z o.o.",
        "5260250274",
        "ul. Polna 3",
        "00-625 Warszawa",
    )
    .phone("+48 22 123 45 67")
    .bank("mBank S.A.", "ul. Prosta 18, 00-850 Warszawa")
    .iban("PL61 1090 1014 0000 0712 1981 2874")
    .build()
}

fn buyer() -> Party {
    PartyBuilder::new(
        "TU Ubezpieczenia S.A.",
        "1070001057",
        "al. Jerozolimskie 100",
        "00-807 Warszawa",
    )
    .build()
}

fn repair_invoice() -> CalculatedInvoice {
    InvoiceDraftBuilder::new("FV/2024/06/015", date(2024, 6, 15))
        .delivery_date(date(2024, 6, 14))
        .issue_place("Warszawa")
        .seller(seller())
        .buyer(buyer())
        .add_item(InvoiceItemBuilder::new("Robocizna", dec!(4.5), "h", dec!(160)).build())
        .add_item(InvoiceItemBuilder::new("Lakierowanie", dec!(1), "usł", dec!(1240.37)).build())
        .add_item(
            InvoiceItemBuilder::new("Zderzak przedni", dec!(1), "szt", dec!(1899))
                .code("5G0807221")
                .build(),
        )
        .add_item(
            InvoiceItemBuilder::new("Wymiana szyby - usługa zwolniona", dec!(1), "usł", dec!(80))
                .vat_rate(dec!(8))
                .build(),
        )
        .payment_terms("14 dni")
        .claim_number("PL2024061500123")
        .vehicle("Volkswagen Golf VIII WX 1234A")
        .build()
        .unwrap()
}

// --- Totals ---

#[test]
fn repair_invoice_totals() {
    let inv = repair_invoice();

    // 4.5 * 160 = 720, 1240.37, 1899 → 3859.37 at 23 %; 80 at 8 %
    assert_eq!(inv.totals.net, dec!(3939.37));
    // 720 → 165.60, 1240.37 → 285.29, 1899 → 436.77, 80 → 6.40
    assert_eq!(inv.totals.vat, dec!(894.06));
    assert_eq!(inv.totals.gross, dec!(4833.43));

    assert_eq!(inv.vat_summary.len(), 2);
    assert_eq!(inv.vat_summary[0].rate, dec!(8));
    assert_eq!(inv.vat_summary[0].net, dec!(80));
    assert_eq!(inv.vat_summary[1].rate, dec!(23));
    assert_eq!(inv.vat_summary[1].net, dec!(3859.37));
    assert_eq!(inv.vat_summary[1].vat, dec!(887.66));
}

#[test]
fn items_carry_computed_amounts() {
    let inv = repair_invoice();
    for item in &inv.draft.items {
        let net = item.net.unwrap();
        let vat = item.vat.unwrap();
        let gross = item.gross.unwrap();
        assert_eq!(net + vat, gross, "{}", item.name);
    }
    assert_eq!(inv.draft.items[1].vat, Some(dec!(285.29)));
}

#[test]
fn recomputation_is_idempotent() {
    let once = repair_invoice();
    let twice = compute_totals(&once.draft);
    assert_eq!(once, twice);
}

#[test]
fn summary_rows_partition_grand_totals() {
    let inv = repair_invoice();
    let net: rust_decimal::Decimal = inv.vat_summary.iter().map(|r| r.net).sum();
    let vat: rust_decimal::Decimal = inv.vat_summary.iter().map(|r| r.vat).sum();
    assert_eq!(net, inv.totals.net);
    assert_eq!(vat, inv.totals.vat);
}

#[test]
fn summary_merges_equal_rates_with_different_scale() {
    let inv = InvoiceDraftBuilder::new("FV/1", date(2024, 1, 2))
        .issue_place("Kraków")
        .seller(seller())
        .buyer(buyer())
        .add_item(InvoiceItemBuilder::new("A", dec!(1), "szt", dec!(10)).vat_rate(dec!(23)).build())
        .add_item(InvoiceItemBuilder::new("B", dec!(1), "szt", dec!(20)).vat_rate(dec!(23.00)).build())
        .build()
        .unwrap();
    assert_eq!(inv.vat_summary.len(), 1);
    assert_eq!(inv.vat_summary[0].net, dec!(30));
    assert_eq!(inv.vat_summary[0].vat, dec!(6.90));
}

#[test]
fn zero_net_rate_groups_are_omitted() {
    let inv = InvoiceDraftBuilder::new("FV/2", date(2024, 1, 2))
        .issue_place("Kraków")
        .seller(seller())
        .buyer(buyer())
        .add_item(InvoiceItemBuilder::new("Usługa", dec!(1), "usł", dec!(100)).build())
        .add_item(InvoiceItemBuilder::new("Gratis", dec!(1), "szt", dec!(0)).vat_rate(dec!(8)).build())
        .build()
        .unwrap();
    assert_eq!(inv.vat_summary.len(), 1);
    assert_eq!(inv.vat_summary[0].rate, dec!(23));
    assert_eq!(inv.totals.gross, dec!(123.00));
}

// --- Validation ---

#[test]
fn builder_requires_parties() {
    let err = InvoiceDraftBuilder::new("FV/3", date(2024, 1, 2))
        .seller(seller())
        .build()
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Builder(ref m) if m.contains("buyer")));
}

#[test]
fn validation_reports_all_errors() {
    let err = InvoiceDraftBuilder::new("", date(2024, 1, 2))
        .seller(PartyBuilder::new("", "", "", "").build())
        .buyer(buyer())
        .add_item(InvoiceItemBuilder::new("", dec!(-1), "", dec!(-5)).vat_rate(dec!(120)).build())
        .build()
        .unwrap_err();

    let fields: Vec<&str> = err.validation_errors().iter().map(|e| e.field.as_str()).collect();
    for expected in [
        "invoice_number",
        "issue_place",
        "seller.name",
        "seller.tax_id",
        "seller.address_line_1",
        "seller.address_line_2",
        "items.0.name",
        "items.0.unit_of_measure",
        "items.0.quantity",
        "items.0.unit_net_price",
        "items.0.vat_rate_percent",
    ] {
        assert!(fields.contains(&expected), "missing {expected}: {fields:?}");
    }
    assert!(!fields.iter().any(|f| f.starts_with("buyer")));
    assert!(err.to_string().starts_with("validation failed: "));
}

#[test]
fn empty_item_list_is_rejected() {
    let draft = InvoiceDraftBuilder::new("FV/4", date(2024, 1, 2))
        .issue_place("Gdańsk")
        .seller(seller())
        .buyer(buyer())
        .build_draft()
        .unwrap();
    let errors = validate_draft(&draft);
    assert_eq!(errors, vec![ValidationError::new("items", "at least one line item is required")]);
}

#[test]
fn inconsistent_overrides_are_rejected() {
    let draft = InvoiceDraftBuilder::new("FV/5", date(2024, 1, 2))
        .issue_place("Gdańsk")
        .seller(seller())
        .buyer(buyer())
        .add_item(
            InvoiceItemBuilder::new("Ryczałt", dec!(1), "usł", dec!(100))
                .net(dec!(100))
                .vat(dec!(23))
                .gross(dec!(124))
                .build(),
        )
        .build_draft()
        .unwrap();
    let errors = validate_draft(&draft);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "items.0.gross");
}

// --- Serialization ---

#[test]
fn draft_accepts_legacy_field_names() {
    let json = serde_json::json!({
        "invoice_number": "FV/6",
        "issue_date": "2024-02-01",
        "delivery_date": "2024-02-01",
        "issue_place": "Poznań",
        "seller": {"name": "S", "nip": "1", "address_line_1": "a", "address_line_2": "b"},
        "buyer": {"name": "B", "nip": "2", "address_line_1": "c", "address_line_2": "d"},
        "items": [{
            "name": "Olej", "kjc": "20.59", "quantity": "4", "unit_of_measure": "l",
            "unit_net_price": "39.90", "vat_rate_percent": 23
        }]
    });
    let draft: InvoiceDraft = serde_json::from_value(json).unwrap();
    assert_eq!(draft.seller.tax_id, "1");
    assert_eq!(draft.items[0].classification_code.as_deref(), Some("20.59"));
    assert_eq!(draft.copy_type, "ORYGINAŁ");
    assert_eq!(draft.payment_type, "przelew");
    assert_eq!(compute_totals(&draft).totals.gross, dec!(196.31));
}

// --- Numbering and formatting ---

#[test]
fn claim_numbers_become_invoice_numbers() {
    assert_eq!(numbering::invoice_number_from_claim("2024/ 06 /15 7"), "AUDATEX/2024/06/157");
}

#[test]
fn printed_amounts() {
    let inv = repair_invoice();
    assert_eq!(format::format_amount(inv.totals.gross), "4833,43");
    assert_eq!(format::format_amount(dec!(48334.3)), "48\u{a0}334,30");
    assert_eq!(
        format::amount_in_words(dec!(1002.05)),
        "jeden tysiąc dwa złote pięć groszy"
    );
}

#[test]
fn gross_only_override_must_balance() {
    let draft = InvoiceDraftBuilder::new("FV/7", date(2024, 1, 2))
        .issue_place("Gdańsk")
        .seller(seller())
        .buyer(buyer())
        .add_item(
            InvoiceItemBuilder::new("Ryczałt", dec!(1), "usł", dec!(100))
                .gross(dec!(125))
                .build(),
        )
        .build_draft()
        .unwrap();
    assert_eq!(validate_draft(&draft)[0].field, "items.0.gross");

    let mut balanced = draft.clone();
    balanced.items[0].gross = Some(dec!(123));
    assert!(validate_draft(&balanced).is_empty());
}
