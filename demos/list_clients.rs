use std::io;

use fossbilling::{FossBillingClient, Params};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = required_env("FOSSBILLING_URL")?;
    let api_key = required_env("FOSSBILLING_API_KEY")?;

    let client = FossBillingClient::new(base_url, api_key)?;
    let clients = client
        .clients()
        .list(&Params::new().with("page", 1).with("per_page", 25))?;

    for record in &clients {
        println!(
            "#{} {} <{}>",
            record["id"],
            record["first_name"].as_str().unwrap_or_default(),
            record["email"].as_str().unwrap_or_default()
        );
    }
    println!("{} client(s)", clients.len());

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
