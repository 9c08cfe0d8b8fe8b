use std::path::PathBuf;

use seolma_client::config::{StorageBackend, StorageConfig};
use seolma_client::models::SessionUser;
use seolma_client::session::file_storage::FileStorageConfig;
use seolma_client::session::{create_storage, SessionState, ACCESS_TOKEN_KEY};

fn file_config(name: &str) -> (StorageConfig, PathBuf) {
    let dir = std::env::temp_dir().join(format!("seolma-{}-{}", name, uuid::Uuid::new_v4()));
    let path = dir.join("session.json");
    let config = StorageConfig {
        persistent: true,
        backend: Some(StorageBackend::File(FileStorageConfig { path: path.clone() })),
    };
    (config, dir)
}

fn reload(config: &StorageConfig) -> SessionState {
    SessionState::load(create_storage(config).unwrap())
}

#[test]
fn test_token_survives_reload() {
    let (config, dir) = file_config("token");

    let session = reload(&config);
    assert!(!session.is_authenticated());
    session.set_access_token(Some("abc".to_string())).unwrap();
    assert_eq!(reload(&config).access_token().as_deref(), Some("abc"));

    session.set_access_token(None).unwrap();
    assert_eq!(reload(&config).access_token(), None);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_logout_clears_stored_user() {
    let (config, dir) = file_config("logout");

    let session = reload(&config);
    session
        .sign_in("abc".to_string(), SessionUser::new("u1", "Kim", "ADMIN"))
        .unwrap();
    let restored = reload(&config);
    assert!(restored.is_admin());
    assert_eq!(restored.user().map(|u| u.user_name), Some("Kim".to_string()));

    restored.logout().unwrap();
    let after = reload(&config);
    assert!(!after.is_authenticated());
    assert_eq!(after.user(), None);

    let storage = create_storage(&config).unwrap();
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);

    std::fs::remove_dir_all(dir).unwrap();
}
