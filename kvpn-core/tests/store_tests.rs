//! Tests for the file-backed record store

use kvpn_core::error::StoreError;
use kvpn_core::server::{RecordStore, TomlStore, VpnConfiguration};
use tempfile::TempDir;

fn server(country: &str, expire_time: i64) -> VpnConfiguration {
    VpnConfiguration {
        country: country.to_string(),
        country_flag_url: format!("http://flags/{}.png", country),
        ip: "10.0.0.1".to_string(),
        config: "cfgblob".to_string(),
        expire_time,
        ..VpnConfiguration::empty()
    }
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = TomlStore::new(dir.path().join("servers.toml"));

    assert!(store.list().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_insert_assigns_ids_and_persists() {
    // Given: A store in a directory that does not exist yet
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("servers.toml");
    let mut store = TomlStore::new(&path);

    // When: Two records are inserted
    let first = store.insert(server("US", 0)).unwrap();
    let second = store.insert(server("JP", 0)).unwrap();

    // Then: Ids are assigned and a fresh handle sees both
    assert_eq!((first.id, second.id), (1, 2));
    let reopened = TomlStore::new(&path);
    let listed = reopened.list().unwrap();
    assert_eq!(listed, vec![first, second.clone()]);
    assert_eq!(reopened.get(2).unwrap(), Some(second));
    assert_eq!(reopened.get(7).unwrap(), None);
}

#[test]
fn test_delete_expired_keeps_unknown_expiry() {
    let dir = TempDir::new().unwrap();
    let mut store = TomlStore::new(dir.path().join("servers.toml"));
    store.insert(server("US", 0)).unwrap();
    store.insert(server("DE", 100)).unwrap();
    store.insert(server("KR", 300)).unwrap();

    assert_eq!(store.delete_expired(200).unwrap(), 1);

    let countries: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|r| r.country)
        .collect();
    assert_eq!(countries, vec!["US".to_string(), "KR".to_string()]);
}

#[test]
fn test_ids_keep_increasing_after_prune() {
    let dir = TempDir::new().unwrap();
    let mut store = TomlStore::new(dir.path().join("servers.toml"));
    store.insert(server("US", 10)).unwrap();
    store.delete_expired(20).unwrap();

    let next = store.insert(server("JP", 0)).unwrap();
    assert_eq!(next.id, 2);
}

#[test]
fn test_listing_file_without_ids_can_be_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("listing.toml");
    std::fs::write(
        &path,
        r#"
[[servers]]
country = "Japan"
countryFlagUrl = "http://flags/jp.png"
ip = "219.100.37.1"
sessions = "42 sessions"
upTime = "12 days"
speed = "88.1 Mbps"
config = "cfgblob"
score = 1200
expireTime = 0
premium = true
"#,
    )
    .unwrap();

    let listed = TomlStore::new(&path).list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 0);
    assert!(listed[0].premium);
    assert!(listed[0].is_usable());
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.toml");
    std::fs::write(&path, "servers = 12").unwrap();

    let err = TomlStore::new(&path).list().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn test_zero_next_id_in_file_still_assigns_real_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.toml");
    std::fs::write(&path, "next_id = 0\n").unwrap();

    let stored = TomlStore::new(&path).insert(server("US", 0)).unwrap();
    assert_eq!(stored.id, 1);
}

#[test]
fn test_missing_next_id_does_not_duplicate_stored_ids() {
    // Given: A store file whose servers carry ids but no counter
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.toml");
    std::fs::write(
        &path,
        r#"
[[servers]]
country = "Japan"
countryFlagUrl = "http://flags/jp.png"
ip = "219.100.37.1"
sessions = ""
upTime = ""
speed = ""
config = "cfgblob"
score = 10
expireTime = 0
id = 1
"#,
    )
    .unwrap();
    let mut store = TomlStore::new(&path);

    // When: Another server is inserted
    let stored = store.insert(server("US", 0)).unwrap();

    // Then: It gets a fresh id and both remain addressable
    assert_eq!(stored.id, 2);
    let ids: Vec<u32> = store.list().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(store.get(1).unwrap().unwrap().country, "Japan");
    assert_eq!(store.get(2).unwrap().unwrap().country, "US");
}

#[test]
fn test_exhausted_next_id_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.toml");
    std::fs::write(&path, "next_id = 4294967295\n").unwrap();
    let mut store = TomlStore::new(&path);

    let err = store.insert(server("US", 0)).unwrap_err();

    assert_eq!(err, StoreError::IdsExhausted);
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_insert_all_then_ranked_listing() {
    let dir = TempDir::new().unwrap();
    let mut store = TomlStore::new(dir.path().join("servers.toml"));

    let mut low = server("US", 0);
    low.score = 1;
    let mut high = server("JP", 0);
    high.score = 9;
    let stored = store.insert_all(vec![low, high, server("DE", 50)]).unwrap();
    assert_eq!(stored.len(), 3);

    let listed = store
        .listing(&kvpn_core::server::ListingPolicy::default(), 100)
        .unwrap();
    let countries: Vec<&str> = listed.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(countries, vec!["JP", "US"]);
}
