mod review;
mod review_state;

pub use review::GhReview;
pub use review_state::GhReviewState;
