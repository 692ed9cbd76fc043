pub mod a001_batch;
pub mod a002_supply_chain_event;
pub mod common;
