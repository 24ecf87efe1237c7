// Internal modules
mod header;
mod payload;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use header::{Header, TokenType};
pub use payload::Payload;
pub use token::Token;
