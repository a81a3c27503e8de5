mod application;
mod branch;
mod repository;
mod user;

pub use application::GhAppManifestConversion;
pub use branch::GhBranchShort;
pub use repository::GhRepository;
pub use user::GhUser;
