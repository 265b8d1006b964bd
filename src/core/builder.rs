use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::totals;
use super::types::*;
use super::validation;

/// Builder for invoice drafts.
///
/// ```
/// use faktura_vat::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceDraftBuilder::new("FV/2024/06/001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .issue_place("Warszawa")
///     .seller(PartyBuilder::new("Auto Serwis Sp. z o.o.", "5270000000", "Ostroroga 22", "01-163 Warszawa").build())
///     .buyer(PartyBuilder::new("Jan Kowalski", "1230000000", "Polna 1", "00-001 Warszawa").build())
///     .add_item(InvoiceItemBuilder::new("Robocizna", dec!(2), "h", dec!(150)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.gross, dec!(369.00));
/// ```
pub struct InvoiceDraftBuilder {
    invoice_number: String,
    issue_date: NaiveDate,
    delivery_date: Option<NaiveDate>,
    issue_place: String,
    copy_type: String,
    seller: Option<Party>,
    buyer: Option<Party>,
    items: Vec<InvoiceItem>,
    payment_terms: Option<String>,
    payment_type: String,
    document_notes: Option<String>,
    claim_number: Option<String>,
    vehicle: Option<String>,
    webhook_url: Option<String>,
}

impl InvoiceDraftBuilder {
    pub fn new(invoice_number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            issue_date,
            delivery_date: None,
            issue_place: String::new(),
            copy_type: DEFAULT_COPY_TYPE.to_string(),
            seller: None,
            buyer: None,
            items: Vec::new(),
            payment_terms: None,
            payment_type: DEFAULT_PAYMENT_TYPE.to_string(),
            document_notes: None,
            claim_number: None,
            vehicle: None,
            webhook_url: None,
        }
    }

    /// Defaults to the issue date.
    pub fn delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn issue_place(mut self, place: impl Into<String>) -> Self {
        self.issue_place = place.into();
        self
    }

    pub fn copy_type(mut self, copy_type: impl Into<String>) -> Self {
        self.copy_type = copy_type.into();
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn add_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = InvoiceItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    pub fn payment_type(mut self, payment_type: impl Into<String>) -> Self {
        self.payment_type = payment_type.into();
        self
    }

    pub fn document_notes(mut self, notes: impl Into<String>) -> Self {
        self.document_notes = Some(notes.into());
        self
    }

    pub fn claim_number(mut self, claim: impl Into<String>) -> Self {
        self.claim_number = Some(claim.into());
        self
    }

    pub fn vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Assemble the draft without validating it.
    pub fn build_draft(self) -> Result<InvoiceDraft, InvoiceError> {
        let seller = self
            .seller
            .ok_or_else(|| InvoiceError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| InvoiceError::Builder("buyer is required".into()))?;

        Ok(InvoiceDraft {
            invoice_number: self.invoice_number,
            issue_date: self.issue_date,
            delivery_date: self.delivery_date.unwrap_or(self.issue_date),
            issue_place: self.issue_place,
            copy_type: self.copy_type,
            seller,
            buyer,
            items: self.items,
            payment_terms: self.payment_terms,
            payment_type: self.payment_type,
            document_notes: self.document_notes,
            claim_number: self.claim_number,
            vehicle: self.vehicle,
            webhook_url: self.webhook_url,
        })
    }

    /// Build the draft, validate it and compute its totals.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<CalculatedInvoice, InvoiceError> {
        let draft = self.build_draft()?;

        let errors = validation::validate_draft(&draft);
        if !errors.is_empty() {
            return Err(InvoiceError::Validation(errors));
        }

        Ok(totals::compute_totals(&draft))
    }
}

/// Builder for a seller or buyer.
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        address_line_1: impl Into<String>,
        address_line_2: impl Into<String>,
    ) -> Self {
        Self {
            party: Party {
                name: name.into(),
                tax_id: tax_id.into(),
                address_line_1: address_line_1.into(),
                address_line_2: address_line_2.into(),
                ..Party::default()
            },
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.party.phone = Some(phone.into());
        self
    }

    pub fn bank(mut self, name: impl Into<String>, branch_address: impl Into<String>) -> Self {
        self.party.bank_name = Some(name.into());
        self.party.bank_branch_address = Some(branch_address.into());
        self
    }

    pub fn iban(mut self, iban: impl Into<String>) -> Self {
        self.party.iban = Some(iban.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for line items. The VAT rate defaults to 23%.
pub struct InvoiceItemBuilder {
    item: InvoiceItem,
}

impl InvoiceItemBuilder {
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        unit_of_measure: impl Into<String>,
        unit_net_price: Decimal,
    ) -> Self {
        Self {
            item: InvoiceItem {
                name: name.into(),
                code: None,
                classification_code: None,
                quantity,
                unit_of_measure: unit_of_measure.into(),
                unit_net_price,
                vat_rate_percent: STANDARD_VAT_RATE,
                net: None,
                vat: None,
                gross: None,
            },
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.item.code = Some(code.into());
        self
    }

    pub fn classification_code(mut self, code: impl Into<String>) -> Self {
        self.item.classification_code = Some(code.into());
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.item.vat_rate_percent = rate;
        self
    }

    pub fn net(mut self, net: Decimal) -> Self {
        self.item.net = Some(net);
        self
    }

    pub fn vat(mut self, vat: Decimal) -> Self {
        self.item.vat = Some(vat);
        self
    }

    pub fn gross(mut self, gross: Decimal) -> Self {
        self.item.gross = Some(gross);
        self
    }

    pub fn build(self) -> InvoiceItem {
        self.item
    }
}
