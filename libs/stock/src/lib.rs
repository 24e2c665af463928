mod quote;
mod quote_client;

pub use quote::{Direction, Quote};
pub use quote_client::{DEFAULT_QUOTE_API, Meta, QuoteClient, QuoteError};
