pub mod traits;

// Store implementations
pub mod http;
pub mod memory;
