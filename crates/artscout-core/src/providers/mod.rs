// Source implementations for different collection APIs
pub mod artic;

pub use artic::ArticProvider;
