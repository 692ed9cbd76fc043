pub mod aggregate;
pub mod journey;
