//! Session Transport
//!
//! Cookie-based login against the Qbis web application and the path-joining
//! request helpers every endpoint call goes through.

pub mod scraper;
mod transport;

pub use scraper::{IdentityResolver, ScriptBlockResolver};
pub use transport::Session;
