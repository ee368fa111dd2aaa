use secrecy::SecretString;
use tempfile::tempdir;
use tresor_core::crypto::CipherCodec;
use tresor_core::storage::SqliteSecretStore;
use tresor_core::{SecretStore, SecretVault, TresorError};

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[test]
fn test_create_insert_reopen_open() {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("tresor.db");
    let vault = SecretVault::default();

    let id = {
        let store = SqliteSecretStore::create(&path).expect("create should succeed");
        let sealed = vault
            .seal(1, &password("correct horse"), "top secret")
            .expect("seal should succeed");
        store.insert(&sealed).expect("insert should succeed").id()
    };

    let store = SqliteSecretStore::open(&path).expect("open should succeed");
    let secret = store
        .get(id)
        .expect("get should succeed")
        .expect("secret should exist");
    let content = vault
        .open(&secret, &password("correct horse"))
        .expect("open should succeed");
    assert_eq!(content.as_str(), "top secret");
}

#[test]
fn test_database_file_does_not_contain_plaintext() {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("tresor.db");

    {
        let store = SqliteSecretStore::create(&path).expect("create should succeed");
        for codec in [CipherCodec::default(), CipherCodec::legacy()] {
            let sealed = SecretVault::new(codec)
                .seal(1, &password("correct horse"), "PLAINTEXT_MARKER_123")
                .expect("seal should succeed");
            store.insert(&sealed).expect("insert should succeed");
        }
    }

    let on_disk = std::fs::read(&path).expect("read should succeed");
    let haystack = String::from_utf8_lossy(&on_disk);
    assert!(!haystack.contains("PLAINTEXT_MARKER_123"));
}

#[test]
fn test_create_refuses_existing_file() {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("tresor.db");

    SqliteSecretStore::create(&path).expect("create should succeed");
    let result = SqliteSecretStore::create(&path);
    assert!(matches!(result, Err(TresorError::Storage(_))));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempdir().expect("tempdir should be created");
    let result = SqliteSecretStore::open(&dir.path().join("missing.db"));
    assert!(matches!(result, Err(TresorError::NotFound(_))));
}

#[test]
fn test_wrong_password_on_stored_secret() {
    let store = SqliteSecretStore::open_in_memory().expect("store should open");
    let vault = SecretVault::default();
    let sealed = vault
        .seal(4, &password("correct horse"), "top secret")
        .expect("seal should succeed");
    let secret = store.insert(&sealed).expect("insert should succeed");

    let result = vault.open(&secret, &password("battery staple"));
    assert!(matches!(result, Err(TresorError::Decryption(_))));
}
