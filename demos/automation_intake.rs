//! Simulate an automation workflow: create an invoice from a sparse request,
//! complete it and report the webhook outcome.
//!
//! Reads `AUTOMATION_SECRET`, `WEBHOOK_SECRET` and the other settings from the
//! environment (or `.env`).

use chrono::Utc;
use faktura_vat::automation::{AutomationRequest, complete_from_automation, create_from_automation};
use faktura_vat::settings::Settings;
use faktura_vat::store::{InvoiceStore, MemoryRepository};
use faktura_vat::webhook::HttpWebhookNotifier;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let settings = Settings::load()?;
    let store = InvoiceStore::new(MemoryRepository::new(), HttpWebhookNotifier::from_settings(&settings)?);

    let presented = settings
        .automation_secret
        .as_ref()
        .map(|s| s.expose_secret().clone());

    let request: AutomationRequest = serde_json::from_str(
        r#"{
            "buyer": {"name": "Anna Nowak", "nip": "9512345678", "address_line_1": "ul. Długa 5"},
            "items": [
                {"name": "Wymiana rozrządu", "qty": 1, "uom": "usł", "unit_net": 1450},
                {"name": "Zestaw rozrządu", "code": "CT1028WP2", "qty": 1, "unit_net": "689.00"}
            ],
            "claim_number": "2024/06/ 0153",
            "webhook_url": "http://localhost:5678/webhook/faktura"
        }"#,
    )?;

    let receipt = create_from_automation(
        &store,
        &settings,
        presented.as_deref(),
        &request,
        "http://localhost:5000",
        Utc::now(),
    )
    .await?;
    println!("created {} -> {}", receipt.invoice.draft.invoice_number, receipt.edit_url);

    let completed = complete_from_automation(&store, &settings, presented.as_deref(), receipt.invoice.id).await?;
    println!(
        "status: {}, gross: {} PLN, webhook delivered: {}",
        completed.status, completed.total_gross, completed.webhook_completed
    );

    if !completed.webhook_completed {
        println!("webhook not acknowledged; retry later with InvoiceStore::retry_webhook");
    }
    Ok(())
}
