pub mod sample;
pub mod tick;
