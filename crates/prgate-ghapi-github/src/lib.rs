//! GitHub driver for the pull request platform interface.

mod api_root;
mod auth;
mod errors;
mod github;
mod installation;
mod manifest;
mod pagination;
mod transport;

pub use api_root::{is_default_hostname, ApiRoot, ConnectionSettings};
pub use auth::{
    credentials_from_config, AppCredentials, Credentials, PrivateKeySource, StaticCredentials,
};
pub use errors::GitHubError;
pub use github::{GitHubApiService, AUTOMERGE_COMMIT_MESSAGE};
pub use installation::InstallationResolver;
pub use manifest::{exchange_manifest_code, AppRegistration};
pub use pagination::{paginate, Page, FIRST_PAGE, PAGE_SIZE};
pub use transport::Transport;

#[cfg(test)]
mod testutils;
