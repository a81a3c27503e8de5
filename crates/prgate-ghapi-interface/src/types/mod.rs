mod common;
mod pulls;
mod reviews;
mod statuses;

pub use common::*;
pub use pulls::*;
pub use reviews::*;
pub use statuses::*;
