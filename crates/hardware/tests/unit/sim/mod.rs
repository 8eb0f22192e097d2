pub mod context;
pub mod expect;
pub mod loader;
pub mod programs;
