pub mod exchange;
pub mod volume;
