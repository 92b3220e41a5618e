pub mod schema;
pub mod store;
pub mod util;

pub use store::DbStore;
