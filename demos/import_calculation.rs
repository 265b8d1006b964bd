//! Import a calculation export and print the resulting invoice lines.
//!
//! Usage: `cargo run --example import_calculation --features import -- export.json`

use chrono::NaiveDate;
use faktura_vat::calculation::parse_calculation_str;
use faktura_vat::core::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: import_calculation <export.json>");
        std::process::exit(2);
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("cannot read {path}: {e}");
            std::process::exit(1);
        }
    };

    let import = match parse_calculation_str(&text) {
        Ok(import) => import,
        Err(e) => {
            eprintln!("import failed: {e}");
            std::process::exit(1);
        }
    };

    let base = InvoiceDraftBuilder::new("", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .issue_place("Warszawa")
        .seller(PartyBuilder::new("Warsztat", "5260250274", "ul. Polna 3", "00-625 Warszawa").build())
        .buyer(PartyBuilder::new("Ubezpieczyciel", "1070001057", "al. Jerozolimskie 100", "00-807 Warszawa").build())
        .build_draft()
        .unwrap();

    let invoice = compute_totals(&import.apply_to(&base));

    println!("Numer: {}", invoice.draft.invoice_number);
    if let Some(vehicle) = &invoice.draft.vehicle {
        println!("Pojazd: {vehicle}");
    }
    for item in &invoice.draft.items {
        println!(
            "  {:<32} {:>7} {:<3} {:>10}",
            item.name,
            item.quantity,
            item.unit_of_measure,
            format::format_amount(item.net.unwrap_or_default()),
        );
    }
    println!("Razem brutto: {} zł", format::format_amount(invoice.totals.gross));
}
