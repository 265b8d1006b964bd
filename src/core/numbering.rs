use chrono::{DateTime, Datelike, Utc};

/// Prefix of invoice numbers derived from a calculation claim id.
pub const CLAIM_NUMBER_PREFIX: &str = "AUDATEX/";

/// Prefix of invoice numbers fabricated for automation requests.
pub const AUTOMATION_NUMBER_PREFIX: &str = "AUTO/";

/// Suggest an invoice number for a claim: the prefix followed by the claim id
/// with all whitespace removed.
///
/// ```
/// use faktura_vat::core::numbering::invoice_number_from_claim;
///
/// assert_eq!(invoice_number_from_claim("2024/12/ 001"), "AUDATEX/2024/12/001");
/// ```
pub fn invoice_number_from_claim(claim_number: &str) -> String {
    let compact: String = claim_number.split_whitespace().collect();
    format!("{CLAIM_NUMBER_PREFIX}{compact}")
}

/// Fabricate an automation invoice number, `AUTO/<year>/<unix millis>`.
pub fn automation_invoice_number(now: DateTime<Utc>) -> String {
    format!(
        "{AUTOMATION_NUMBER_PREFIX}{}/{}",
        now.year(),
        now.timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn claim_number_loses_all_whitespace() {
        assert_eq!(invoice_number_from_claim("PL 123\t456"), "AUDATEX/PL123456");
        assert_eq!(invoice_number_from_claim("ABC"), "AUDATEX/ABC");
    }

    #[test]
    fn automation_number_uses_year_and_millis() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            automation_invoice_number(now),
            format!("AUTO/2024/{}", now.timestamp_millis())
        );
        assert_eq!(automation_invoice_number(now), "AUTO/2024/1709294400000");
    }
}
