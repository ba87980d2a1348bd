//! JSON-file persistence. The whole dataset lives in memory as a [`Snapshot`]
//! and is rewritten to disk after every successful update.

mod snapshot;

pub use snapshot::Snapshot;

use crate::error::StoreError;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, info};

pub struct Store {
    path: PathBuf,
    data: Mutex<Snapshot>,
}

impl Store {
    /// Loads the data file, creating it with the demo accounts when missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path.exists() {
            let raw = fs::read_to_string(path)?;
            let data: Snapshot = serde_json::from_str(&raw)?;
            info!(
                path = %path.display(),
                users = data.users.len(),
                records = data.attendance.len(),
                "Data file loaded"
            );
            return Ok(Self {
                path: path.to_path_buf(),
                data: Mutex::new(data),
            });
        }

        info!(path = %path.display(), "Data file missing, seeding demo accounts");
        Self::create(path, Snapshot::seeded()?)
    }

    /// Writes `data` to `path` (replacing any existing file) and serves it.
    pub fn create(path: impl AsRef<Path>, data: Snapshot) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        write_snapshot(&path, &data)?;
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.lock())
    }

    /// Runs `f` against a copy of the data. On `Ok` the copy is written to
    /// disk and becomes current; on `Err` (from `f` or the write) nothing changes.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut Snapshot) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.lock();
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        write_snapshot(&self.path, &draft)?;
        *guard = draft;
        debug!(path = %self.path.display(), "Data file written");
        Ok(out)
    }

    /// [`Store::update`] on actix's blocking pool, so the file rewrite never
    /// stalls a worker.
    pub async fn update_blocking<R, E, F>(self: Arc<Self>, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Snapshot) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        actix_web::web::block(move || self.update(f))
            .await
            .map_err(|_| E::from(StoreError::Blocking))?
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // A panic mid-update never touches the current snapshot, so a
        // poisoned lock still guards consistent data.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn write_snapshot(path: &Path, data: &Snapshot) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::model::{role::Role, user::User};

    fn user(id: u64, username: &str) -> User {
        User {
            id,
            username: username.into(),
            password: "$argon2id$placeholder".into(),
            name: username.into(),
            role: Role::Employee,
            email: format!("{username}@company.com"),
        }
    }

    fn empty() -> Snapshot {
        Snapshot {
            users: vec![user(1, "emp001")],
            attendance: vec![],
            notifications: vec![],
            next_id: 2,
        }
    }

    #[test]
    fn update_persists_and_reopen_sees_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let store = Store::create(&path, empty()).unwrap();
        let id = store
            .update(|d| -> Result<u64, AppError> {
                let id = d.next_id();
                d.users.push(user(id, "emp002"));
                Ok(id)
            })
            .unwrap();
        assert_eq!(id, 2);
        drop(store);

        let reopened = Store::open(&path).unwrap();
        reopened.read(|d| {
            assert_eq!(d.users.len(), 2);
            assert_eq!(d.next_id, 3);
        });
    }

    #[test]
    fn failed_update_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = Store::create(&path, empty()).unwrap();

        let result = store.update(|d| -> Result<(), AppError> {
            d.users.clear();
            d.next_id();
            Err(AppError::Forbidden)
        });
        assert!(result.is_err());

        store.read(|d| {
            assert_eq!(d.users.len(), 1);
            assert_eq!(d.next_id, 2);
        });
        let on_disk: Snapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.users.len(), 1);
    }

    #[actix_web::test]
    async fn blocking_update_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = Arc::new(Store::create(&path, empty()).unwrap());

        let id = store
            .clone()
            .update_blocking(|d| -> Result<u64, AppError> {
                let id = d.next_id();
                d.users.push(user(id, "emp002"));
                Ok(id)
            })
            .await
            .unwrap();
        assert_eq!(id, 2);
        store.read(|d| assert_eq!(d.users.len(), 2));

        let err = store
            .clone()
            .update_blocking(|_| -> Result<(), AppError> { Err(AppError::Forbidden) })
            .await;
        assert!(matches!(err, Err(AppError::Forbidden)));
        assert_eq!(Store::open(&path).unwrap().read(|d| d.next_id), 3);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Store::open(&path), Err(StoreError::Json(_))));
    }
}
