pub mod loader;
pub mod synthetic;
