pub mod token;

// Re-export commonly used types
pub use token::{Order, PairRecord, TokenDescriptor, TokenDetail};
