pub mod ids;
pub mod postback;

pub use ids::{IdGenerator, PostbackId};
pub use postback::{first_values, CaptureRequest, Postback};
