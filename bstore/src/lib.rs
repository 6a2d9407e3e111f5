//! Session state persistence layer for the banter conversational client.

mod error;
mod filesystem;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        DEFAULT_RECORD_NAME, FilesystemStateStore, InMemoryStateStore, SessionRecord, StateStore,
        StoreConfig, StoreError, StoreErrorKind, ThemePreference, create_default_state_store,
        create_state_store,
    };
}

pub use error::{StoreError, StoreErrorKind};
pub use filesystem::{DEFAULT_RECORD_NAME, FilesystemStateStore};
pub use store::{
    InMemoryStateStore, StateStore, StoreConfig, create_default_state_store, create_state_store,
    default_store_root,
};
pub use types::{SessionRecord, ThemePreference};

#[cfg(test)]
mod tests {
    use bprovider::{Message, Role};

    use crate::{
        FilesystemStateStore, InMemoryStateStore, SessionRecord, StateStore, StoreErrorKind,
        ThemePreference,
    };

    fn temp_dir(prefix: &str) -> std::path::PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("bstore-{prefix}-{unique}"))
    }

    fn sample_record() -> SessionRecord {
        SessionRecord::new(
            vec![
                Message::new(Role::User, "hello"),
                Message::new(Role::Assistant, "hi there"),
            ],
            ThemePreference::Dark,
            Some("sk-persisted".to_string()),
        )
    }

    #[tokio::test]
    async fn in_memory_store_round_trips_records() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.load().await.expect("load"), None);

        let record = sample_record();
        store.save(record.clone()).await.expect("save");

        let loaded = store.load().await.expect("load").expect("record");
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn filesystem_store_round_trips_records() {
        let root = temp_dir("roundtrip");
        let store = FilesystemStateStore::new(&root).expect("store should initialize");

        assert_eq!(store.load().await.expect("load"), None);

        let record = sample_record();
        store.save(record.clone()).await.expect("save");

        let loaded = store.load().await.expect("load").expect("record");
        assert_eq!(loaded.messages, record.messages);
        assert_eq!(loaded.theme, ThemePreference::Dark);
        assert_eq!(
            loaded.provider_credential.as_deref(),
            Some("sk-persisted")
        );

        std::fs::remove_dir_all(&root).expect("temporary directory should be removable");
    }

    #[tokio::test]
    async fn filesystem_store_overwrites_previous_record() {
        let root = temp_dir("overwrite");
        let store = FilesystemStateStore::new(&root).expect("store should initialize");

        store.save(sample_record()).await.expect("first save");
        store
            .save(SessionRecord::default())
            .await
            .expect("second save");

        let loaded = store.load().await.expect("load").expect("record");
        assert!(loaded.messages.is_empty());
        assert_eq!(loaded.theme, ThemePreference::Light);
        assert_eq!(loaded.provider_credential, None);

        std::fs::remove_dir_all(&root).expect("temporary directory should be removable");
    }

    #[tokio::test]
    async fn unknown_role_value_is_rejected_on_load() {
        let root = temp_dir("bad-role");
        let store = FilesystemStateStore::new(&root).expect("store should initialize");

        let raw = r#"{
            "messages": [{
                "id": "m-1",
                "role": "system",
                "content": "not a chat role",
                "created_at_secs": 1,
                "created_at_nanos": 0
            }],
            "theme": "light",
            "provider_credential": null
        }"#;
        std::fs::write(root.join("chat-storage.json"), raw).expect("seed raw record");

        let error = store.load().await.expect_err("unknown role must fail");
        assert_eq!(error.kind, StoreErrorKind::InvalidRecord);

        std::fs::remove_dir_all(&root).expect("temporary directory should be removable");
    }

    #[tokio::test]
    async fn custom_record_name_is_respected() {
        let root = temp_dir("named");
        let store = FilesystemStateStore::new(&root)
            .expect("store should initialize")
            .with_record_name("workbench");

        store.save(sample_record()).await.expect("save");
        assert!(root.join("workbench.json").exists());
        assert!(!root.join("chat-storage.json").exists());

        std::fs::remove_dir_all(&root).expect("temporary directory should be removable");
    }
}
