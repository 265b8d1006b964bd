use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use faktura_vat::calculation;
use faktura_vat::core::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn party(name: &str) -> Party {
    PartyBuilder::new(name, "5260250274", "ul. Polna 3", "00-625 Warszawa").build()
}

fn draft_with_items(count: usize) -> InvoiceDraft {
    let rates = [dec!(23), dec!(8), dec!(5), dec!(0)];
    let items = (0..count).map(|i| {
        InvoiceItemBuilder::new(
            format!("Pozycja {i}"),
            Decimal::from(i % 7 + 1),
            "szt",
            Decimal::new(1999 + i as i64 * 37, 2),
        )
        .vat_rate(rates[i % rates.len()])
        .build()
    });

    InvoiceDraftBuilder::new("FV/BENCH/2024", test_date())
        .issue_place("Warszawa")
        .seller(party("Warsztat"))
        .buyer(party("Klient"))
        .items(items)
        .build_draft()
        .unwrap()
}

fn calculation_export(parts: usize) -> Value {
    let part_list: Vec<Value> = (0..parts)
        .map(|i| {
            json!({
                "PartDesc": format!("CZĘŚĆ [{i}] NR {i}"),
                "PartNo": format!("5E0{i:06}"),
                "Price": {"_": format!("{},{:02}", 100 + i, i % 100)},
                "Qty": {"Val": i % 3 + 1}
            })
        })
        .collect();

    json!([{
        "ClaimID": "2024/06/ 0153",
        "Vehicle": {
            "VehicleIdentification": {"ManufacturerName": "SKODA", "ModelName": "OCTAVIA"},
            "VehicleAdmin": {"PlateNumber": "WX 1234A"}
        },
        "Calculation": {
            "Labor": {"PartComposits": {"PartComposit": [{"WuNetHrNo": {"Val": 3.5}}]}},
            "SpareParts": {"PartDtls": {"PartDtl": part_list}},
            "FinalCalc": {
                "FCLabor": {"Tot": {"_": "525,00"}},
                "FCPaint": {"PaintTotOverAll": {"_": "864,99"}},
                "GrandTotal": {"TaxPC": {"Val": 23}}
            }
        }
    }])
}

fn bench_compute_totals(c: &mut Criterion) {
    let draft = draft_with_items(10);
    c.bench_function("compute_totals_10_items", |b| {
        b.iter(|| black_box(compute_totals(black_box(&draft))));
    });
}

fn bench_compute_totals_1000(c: &mut Criterion) {
    let draft = draft_with_items(1000);
    c.bench_function("compute_totals_1000_items", |b| {
        b.iter(|| black_box(compute_totals(black_box(&draft))));
    });
}

fn bench_validate(c: &mut Criterion) {
    let draft = draft_with_items(100);
    c.bench_function("validate_100_items", |b| {
        b.iter(|| black_box(validate_draft(black_box(&draft))));
    });
}

fn bench_parse_calculation(c: &mut Criterion) {
    let export = calculation_export(50);
    c.bench_function("parse_calculation_50_parts", |b| {
        b.iter(|| black_box(calculation::parse_calculation(black_box(&export))));
    });
}

fn bench_parse_calculation_str(c: &mut Criterion) {
    let text = calculation_export(50).to_string();
    c.bench_function("parse_calculation_str_50_parts", |b| {
        b.iter(|| black_box(calculation::parse_calculation_str(black_box(&text))));
    });
}

fn bench_amount_in_words(c: &mut Criterion) {
    c.bench_function("amount_in_words", |b| {
        b.iter(|| black_box(format::amount_in_words(black_box(dec!(1234567.89)))));
    });
}

criterion_group!(
    benches,
    bench_compute_totals,
    bench_compute_totals_1000,
    bench_validate,
    bench_parse_calculation,
    bench_parse_calculation_str,
    bench_amount_in_words,
);
criterion_main!(benches);
