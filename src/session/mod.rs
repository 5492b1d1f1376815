pub mod attempt;
pub mod input;
pub mod plan;
pub mod result;
