use std::sync::OnceLock;

use prgate_crypto::{PrivateRsaKey, RsaUtils};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::{
    api_root::{ApiRoot, ConnectionSettings},
    transport::{AppSigner, RequestSigner, Transport},
    GitHubApiService,
};

pub(crate) const TEST_APP_ID: u64 = 1234;

pub(crate) trait MockServerExt {
    fn api_root(&self) -> ApiRoot;
    fn settings(&self) -> ConnectionSettings;
}

impl MockServerExt for MockServer {
    fn api_root(&self) -> ApiRoot {
        ApiRoot::from_url(&self.uri()).unwrap()
    }

    fn settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(self.api_root())
    }
}

pub(crate) fn test_private_key() -> PrivateRsaKey {
    static KEY: OnceLock<PrivateRsaKey> = OnceLock::new();
    KEY.get_or_init(RsaUtils::generate_rsa_key).clone()
}

pub(crate) fn app_transport(api_root: &ApiRoot) -> Transport {
    let key = test_private_key().to_encoding_key().unwrap();
    let client = ConnectionSettings::new(api_root.clone())
        .client_builder()
        .build()
        .unwrap();

    Transport::new(
        client,
        api_root.clone(),
        RequestSigner::App(AppSigner::new(TEST_APP_ID, key)),
    )
}

pub(crate) fn basic_service(server: &MockServer) -> GitHubApiService {
    let settings = server.settings();
    let client = settings.client_builder().build().unwrap();

    GitHubApiService::new(Transport::new(
        client,
        settings.api_root,
        RequestSigner::Basic {
            username: "me".into(),
            password: "token".into(),
        },
    ))
}

pub(crate) async fn mock_installation_token(server: &MockServer, installation_id: u64, token: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/app/installations/{installation_id}/access_tokens")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "token": token,
            "expires_at": "2099-01-01T00:00:00Z"
        })))
        .mount(server)
        .await;
}
