#![no_main]

use chrono::NaiveDate;
use faktura_vat::calculation::parse_calculation_str;
use faktura_vat::core::{InvoiceDraftBuilder, PartyBuilder, compute_totals, validate_draft};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Errors are fine, panics are bugs.
    let Ok(import) = parse_calculation_str(s) else {
        return;
    };

    let party = PartyBuilder::new("Warsztat", "5260250274", "ul. Polna 3", "00-625 Warszawa").build();
    let base = InvoiceDraftBuilder::new("FV/FUZZ", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .issue_place("Warszawa")
        .seller(party.clone())
        .buyer(party)
        .build_draft()
        .unwrap();

    let draft = import.apply_to(&base);
    let errors = validate_draft(&draft);
    let calculated = compute_totals(&draft);
    if errors.is_empty() {
        // A valid draft recomputes to itself.
        assert_eq!(compute_totals(&calculated.draft), calculated);
    }
});
