use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bcommon::{BoxFuture, MessageId};
use bprovider::{Message, Role};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::StateStore;
use crate::types::{SessionRecord, ThemePreference};

/// Record name inherited from the original browser-storage key.
pub const DEFAULT_RECORD_NAME: &str = "chat-storage";

#[derive(Debug)]
pub struct FilesystemStateStore {
    root: PathBuf,
    record_name: String,
    lock: Mutex<()>,
}

impl FilesystemStateStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|error| {
            StoreError::storage(format!("failed to create state store root: {error}"))
        })?;
        Ok(Self {
            root,
            record_name: DEFAULT_RECORD_NAME.to_string(),
            lock: Mutex::new(()),
        })
    }

    pub fn with_record_name(mut self, record_name: impl Into<String>) -> Self {
        self.record_name = record_name.into();
        self
    }

    fn record_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.record_name))
    }

    fn load_record(&self) -> Result<Option<SessionRecord>, StoreError> {
        let path = self.record_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|error| {
            StoreError::storage(format!("failed to read session record file: {error}"))
        })?;
        let persisted = serde_json::from_slice::<PersistedRecord>(&bytes).map_err(|error| {
            StoreError::invalid_record(format!("failed to deserialize session record: {error}"))
        })?;
        Ok(Some(persisted.into_record()?))
    }

    fn save_record(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let persisted = PersistedRecord::from_record(record)?;
        let bytes = serde_json::to_vec_pretty(&persisted).map_err(|error| {
            StoreError::invalid_record(format!("failed to serialize session record: {error}"))
        })?;

        write_atomic(&self.record_path(), &bytes)
    }
}

impl StateStore for FilesystemStateStore {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| StoreError::storage("filesystem store lock poisoned"))?;
            self.load_record()
        })
    }

    fn save<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| StoreError::storage("filesystem store lock poisoned"))?;
            self.save_record(&record)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRecord {
    messages: Vec<PersistedMessage>,
    theme: String,
    provider_credential: Option<String>,
}

impl PersistedRecord {
    fn from_record(record: &SessionRecord) -> Result<Self, StoreError> {
        Ok(Self {
            messages: record
                .messages
                .iter()
                .map(PersistedMessage::from_message)
                .collect::<Result<Vec<_>, _>>()?,
            theme: record.theme.as_str().to_string(),
            provider_credential: record.provider_credential.clone(),
        })
    }

    fn into_record(self) -> Result<SessionRecord, StoreError> {
        Ok(SessionRecord {
            messages: self
                .messages
                .into_iter()
                .map(PersistedMessage::into_message)
                .collect::<Result<Vec<_>, _>>()?,
            theme: theme_from_str(&self.theme)?,
            provider_credential: self.provider_credential,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedMessage {
    id: String,
    role: String,
    content: String,
    created_at_secs: i64,
    created_at_nanos: i64,
}

impl PersistedMessage {
    fn from_message(message: &Message) -> Result<Self, StoreError> {
        let (secs, nanos) = encode_system_time(message.timestamp)?;
        Ok(Self {
            id: message.id.to_string(),
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
            created_at_secs: secs,
            created_at_nanos: nanos,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        Ok(Message::restored(
            MessageId::new(self.id),
            role_from_str(&self.role)?,
            self.content,
            decode_system_time(self.created_at_secs, self.created_at_nanos)?,
        ))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::storage(
            "session record file missing parent directory",
        ));
    };
    fs::create_dir_all(parent).map_err(|error| {
        StoreError::storage(format!("failed to create parent directory: {error}"))
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        StoreError::storage(format!("failed to write temporary record file: {error}"))
    })?;

    if path.exists() {
        fs::remove_file(path).map_err(|error| {
            StoreError::storage(format!("failed to replace existing record file: {error}"))
        })?;
    }
    fs::rename(&tmp, path)
        .map_err(|error| StoreError::storage(format!("failed to finalize record file: {error}")))
}

fn encode_system_time(value: SystemTime) -> Result<(i64, i64), StoreError> {
    let duration = value.duration_since(UNIX_EPOCH).map_err(|error| {
        StoreError::invalid_record(format!("timestamp predates unix epoch: {error}"))
    })?;
    Ok((
        duration.as_secs() as i64,
        i64::from(duration.subsec_nanos()),
    ))
}

fn decode_system_time(seconds: i64, nanos: i64) -> Result<SystemTime, StoreError> {
    if seconds < 0 {
        return Err(StoreError::invalid_record(format!(
            "timestamp seconds must be non-negative, got {seconds}"
        )));
    }
    if !(0..1_000_000_000).contains(&nanos) {
        return Err(StoreError::invalid_record(format!(
            "timestamp nanos must be in [0, 1_000_000_000), got {nanos}"
        )));
    }
    Ok(UNIX_EPOCH + Duration::new(seconds as u64, nanos as u32))
}

fn theme_from_str(value: &str) -> Result<ThemePreference, StoreError> {
    match value {
        "light" => Ok(ThemePreference::Light),
        "dark" => Ok(ThemePreference::Dark),
        _ => Err(StoreError::invalid_record(format!(
            "unknown theme preference value '{value}'"
        ))),
    }
}

fn role_from_str(value: &str) -> Result<Role, StoreError> {
    match value {
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        _ => Err(StoreError::invalid_record(format!(
            "unknown transcript role value '{value}'"
        ))),
    }
}
