pub mod distribution;
pub mod platform;
