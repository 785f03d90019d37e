//! Mask an email address with scr.im.
//!
//! Usage:
//!   cargo run --example generate -- <email> [alias]
//!
//! Set `RUST_LOG=scrim_client=debug` to see the request and response.

use scrim_client::{Client, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(email) = args.next() else {
        eprintln!("usage: generate <email> [alias]");
        std::process::exit(2);
    };

    println!("🔐 scr.im Rust Client");
    println!("{}", "-".repeat(50));

    let mut client = Client::new()?;
    client.set_email(email);
    if let Some(alias) = args.next() {
        client.set_alias(&alias)?;
    }

    match client.generate().await {
        Ok(response) => {
            let status = if response.is_old() { "existing" } else { "new" };
            println!("✅ {} ({status})", response);
            println!("   Alias:  {}", response.alias());
            println!("   Result: {}", response.result());
        }
        Err(Error::ServiceUnavailable { status }) => {
            eprintln!("⚠️  scr.im is down (HTTP {status}), try again later");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
