use std::io;
use std::time::Duration;

use fossbilling::{FossBillingClient, FossBillingError, Id};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = required_env("FOSSBILLING_URL")?;
    let api_key = required_env("FOSSBILLING_API_KEY")?;
    let invoice_id: Id = std::env::args()
        .nth(1)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "usage: invoice_pdf <id>"))?
        .parse()?;

    let client = FossBillingClient::builder(base_url, api_key)
        .timeout(Duration::from_secs(60))
        .build()?;

    match client.invoices().generate_pdf(invoice_id) {
        Ok(pdf) => {
            let path = format!("invoice-{invoice_id}.pdf");
            std::fs::write(&path, &pdf)?;
            println!("wrote {} bytes to {path}", pdf.len());
        }
        Err(FossBillingError::NotFound { message }) => {
            println!("invoice {invoice_id} not found: {message}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}
