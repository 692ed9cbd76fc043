pub mod journey;
pub mod repository;
pub mod service;
pub mod transfer;
