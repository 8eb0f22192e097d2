pub mod devices;
pub mod transaction;
