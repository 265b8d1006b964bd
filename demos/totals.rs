use chrono::NaiveDate;
use faktura_vat::core::*;
use rust_decimal_macros::dec;

fn main() {
    let invoice = InvoiceDraftBuilder::new("FV/15/06/2024", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .issue_place("Warszawa")
        .seller(
            PartyBuilder::new(
                "Auto Serwis Kowalczyk Sp. z o.o.",
                "5260250274",
                "ul. Polna 3",
                "00-625 Warszawa",
            )
            .bank("mBank S.A.", "ul. Prosta 18, Warszawa")
            .iban("PL61 1090 1014 0000 0712 1981 2874")
            .build(),
        )
        .buyer(PartyBuilder::new("Jan Kowalski", "1234563218", "ul. Leśna 7", "05-500 Piaseczno").build())
        .add_item(InvoiceItemBuilder::new("Robocizna", dec!(2.5), "h", dec!(180)).build())
        .add_item(
            InvoiceItemBuilder::new("Klocki hamulcowe przód", dec!(1), "kpl", dec!(289.90))
                .code("0986494524")
                .build(),
        )
        .add_item(
            InvoiceItemBuilder::new("Utylizacja", dec!(1), "usł", dec!(15))
                .vat_rate(dec!(8))
                .build(),
        )
        .payment_terms("7 dni")
        .vehicle("Toyota Yaris WPI 4455C")
        .build();

    match invoice {
        Ok(inv) => {
            println!("Faktura VAT {}", inv.draft.invoice_number);
            for item in &inv.draft.items {
                println!(
                    "  {:<28} {:>6} {:<4} {:>10} {:>3}% {:>10}",
                    item.name,
                    item.quantity,
                    item.unit_of_measure,
                    format::format_amount(item.unit_net_price),
                    item.vat_rate_percent,
                    format::format_amount(item.gross.unwrap_or_default()),
                );
            }
            println!("\nStawka   Netto      VAT        Brutto");
            for row in &inv.vat_summary {
                println!(
                    "{:>4}%  {:>10} {:>10} {:>10}",
                    row.rate,
                    format::format_amount(row.net),
                    format::format_amount(row.vat),
                    format::format_amount(row.gross),
                );
            }
            println!("\nDo zapłaty: {} zł", format::format_amount(inv.totals.gross));
            println!("Słownie: {}", format::amount_in_words(inv.totals.gross));
        }
        Err(e) => {
            eprintln!("Invoice rejected: {e}");
            for err in e.validation_errors() {
                eprintln!("  - {err}");
            }
        }
    }
}
