//! scr.im Rust Client
//!
//! An async Rust client for the [scr.im](http://scr.im) email-masking service.
//! scr.im hides an email address behind a short URL protected by a captcha.
//!
//! # Example
//! ```no_run
//! use scrim_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scrim_client::Error> {
//!     let mut client = Client::new()?;
//!     client.set_email("foobar@example.org");
//!
//!     let response = client.generate().await?;
//!     if response.is_old() {
//!         println!("Already masked: {}", response.url());
//!     } else {
//!         println!("Created: {}", response);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod transport;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::Response;
pub use transport::{HttpResponse, Param, ReqwestTransport, Transport};

/// Result type alias for scr.im operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
