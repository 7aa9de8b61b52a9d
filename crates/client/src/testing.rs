//! Mocks and fixtures shared by the unit tests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use b2_core::{
    ClientConfig, Credentials, HttpRequest, HttpResponse, KvCache, Result, Transport,
    TransportError,
};

use crate::B2Client;

mockall::mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
    }
}

mockall::mock! {
    pub Cache {}

    #[async_trait]
    impl KvCache for Cache {
        async fn get(&self, key: &str) -> Result<Option<String>>;
        async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
    }
}

pub const API_URL: &str = "https://api001.example.com";
pub const DOWNLOAD_URL: &str = "https://f001.example.com";
pub const ACCOUNT_TOKEN: &str = "4_account_token";

/// `b2_authorize_account` reply pointing at [`API_URL`]
pub fn auth_response() -> String {
    format!(
        r#"{{
            "absoluteMinimumPartSize": 5000000,
            "accountId": "acct123",
            "allowed": {{"capabilities": ["listBuckets", "listFiles", "writeFiles"]}},
            "apiUrl": "{API_URL}",
            "authorizationToken": "{ACCOUNT_TOKEN}",
            "downloadUrl": "{DOWNLOAD_URL}",
            "recommendedPartSize": 100000000,
            "s3ApiUrl": "https://s3.us-west-001.example.com"
        }}"#
    )
}

/// Expect exactly one login and answer it
pub fn expect_authorize(transport: &mut MockTransport) {
    transport
        .expect_send()
        .withf(|req| req.url.ends_with("/b2api/v2/b2_authorize_account"))
        .times(1)
        .returning(|_| Ok(HttpResponse::new(200, auth_response())));
}

/// Expect exactly one call to an authenticated operation and answer it
pub fn expect_operation(
    transport: &mut MockTransport,
    operation: &'static str,
    status: u16,
    body: &'static str,
) {
    let url = format!("{API_URL}/b2api/v2/{operation}");
    transport
        .expect_send()
        .withf(move |req| req.url == url && req.header_value("Authorization") == Some(ACCOUNT_TOKEN))
        .times(1)
        .returning(move |_| Ok(HttpResponse::new(status, body)));
}

pub fn credentials() -> Credentials {
    Credentials::new("keyid", "secret").unwrap()
}

pub fn client(transport: MockTransport) -> B2Client {
    B2Client::builder(credentials())
        .config(ClientConfig::default())
        .transport(Arc::new(transport))
        .build()
        .unwrap()
}

/// A client that has already completed one login
pub async fn authorized_client(mut transport: MockTransport) -> B2Client {
    expect_authorize(&mut transport);
    let client = client(transport);
    client.authorize().await.unwrap();
    client
}
