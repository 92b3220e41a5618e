pub mod correlation;
pub mod favicon;
