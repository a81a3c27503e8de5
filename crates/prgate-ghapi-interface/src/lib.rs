//! Pull request platform interface.

pub mod comments;
mod errors;
mod interface;
pub mod types;

pub use errors::{ApiError, BoxedError, Result};
pub use interface::ApiService;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockApiService;
