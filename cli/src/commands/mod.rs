pub mod analyze;
pub mod visuals;
