//! End-to-end test against the real site. Needs NCORE_USERNAME,
//! NCORE_PASSWORD and optionally NCORE_PASSKEY in the environment or a .env
//! file; run with `cargo test -- --ignored`.

use ncore::client::{Credentials, NcoreClient};

fn credentials_from_env() -> Option<Credentials> {
    dotenv::dotenv().ok();
    Some(Credentials {
        username: std::env::var("NCORE_USERNAME").ok()?,
        password: std::env::var("NCORE_PASSWORD").ok()?,
        passkey: std::env::var("NCORE_PASSKEY").ok(),
    })
}

#[tokio::test]
#[ignore]
async fn login_search_magnet() {
    let credentials = credentials_from_env().expect("NCORE_USERNAME / NCORE_PASSWORD not set");
    let client = NcoreClient::new(credentials).unwrap();

    client.login().await.unwrap();
    assert!(client.is_logged_in().await);

    let results = client.search("dune").await.unwrap();
    assert!(results.len() <= ncore::client::MAX_RESULTS);
    for window in results.windows(2) {
        assert!(window[0].seeders >= window[1].seeders);
    }

    if let Some(first) = results.first() {
        let descriptor = client.fetch_magnet(&first.id).await.unwrap();
        let uri = descriptor.to_uri();
        assert!(uri.starts_with("magnet:?xt=urn:btih:"));
        assert_eq!(descriptor.info_hash.hex().len(), 40);
    }

    client.logout().await;
    assert!(!client.is_logged_in().await);
}
