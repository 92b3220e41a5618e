pub mod error;
pub mod postbacks;
pub mod store;

pub mod types;

pub use crate::error::PostbackError;
pub use crate::postbacks::Postbacks;
pub use crate::store::PostbackRepository;
