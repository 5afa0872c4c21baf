use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::StorageError;
use super::forward::{recipients, write_forward};
use crate::model::{Page, Query, Report, User, paginate};

/// A record persisted as one JSON file per id.
pub trait Record: Serialize + DeserializeOwned {
    /// Directory name under the data dir, also used in error messages.
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    fn is_deleted(&self) -> bool;
    fn set_deleted(&mut self, deleted: bool);

    /// Stamps creation/modification times before a write.
    fn touch(&mut self, created: bool);
}

impl Record for Report {
    const KIND: &'static str = "reports";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    fn touch(&mut self, created: bool) {
        let now = Utc::now();
        if created {
            self.created_at = now;
        }
        self.updated_at = now;
    }
}

impl Record for User {
    const KIND: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    fn touch(&mut self, created: bool) {
        if created {
            self.created_at = Utc::now();
        }
    }
}

/// Manages JSON-file persistence for reports and users.
///
/// Layout: `<data_dir>/reports/<id>.json`, `<data_dir>/users/<id>.json`.
/// Forward messages go to the outbox directory.
pub struct Store {
    base_path: PathBuf,
    outbox: PathBuf,
}

impl Store {
    /// Opens a store rooted at `data_dir`, creating the record directories.
    pub fn open(
        data_dir: impl Into<PathBuf>,
        outbox: impl Into<PathBuf>,
    ) -> Result<Self, StorageError> {
        let base_path = data_dir.into();
        fs::create_dir_all(base_path.join(Report::KIND))?;
        fs::create_dir_all(base_path.join(User::KIND))?;
        let outbox = outbox.into();
        tracing::debug!(path = %base_path.display(), "store opened");
        Ok(Self { base_path, outbox })
    }

    /// Creates a store rooted at the given path with the outbox inside it.
    #[cfg(test)]
    pub(crate) fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        let outbox = base_path.join("outbox");
        Self::open(base_path, outbox)
    }

    pub fn outbox(&self) -> &Path {
        &self.outbox
    }

    fn dir<R: Record>(&self) -> PathBuf {
        self.base_path.join(R::KIND)
    }

    fn record_path<R: Record>(&self, id: u64) -> PathBuf {
        self.dir::<R>().join(format!("{id}.json"))
    }

    fn write<R: Record>(&self, record: &R) -> Result<(), StorageError> {
        let file = fs::File::create(self.record_path::<R>(record.id()))?;
        serde_json::to_writer_pretty(file, record)?;
        Ok(())
    }

    fn ids<R: Record>(&self) -> Result<Vec<u64>, StorageError> {
        let ids = fs::read_dir(self.dir::<R>())?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|entry| {
                let path = entry.path();
                if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }
                path.file_stem()?.to_str()?.parse::<u64>().ok()
            })
            .collect();
        Ok(ids)
    }

    fn next_id<R: Record>(&self) -> Result<u64, StorageError> {
        Ok(self.ids::<R>()?.into_iter().max().unwrap_or(0) + 1)
    }

    /// Loads one record.
    pub fn load<R: Record>(&self, id: u64) -> Result<R, StorageError> {
        let path = self.record_path::<R>(id);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound { kind: R::KIND, id });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(file)?)
    }

    /// Lists all records, deleted ones included, newest id first.
    pub fn list<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        let mut ids = self.ids::<R>()?;
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.into_iter().map(|id| self.load(id)).collect()
    }

    /// Filters with `query` and returns the requested page.
    pub fn search<R: Record>(
        &self,
        query: &impl Query<R>,
        page: usize,
        per_page: usize,
    ) -> Result<Page<R>, StorageError> {
        let matches = self
            .list::<R>()?
            .into_iter()
            .filter(|r| query.accepts(r))
            .collect();
        Ok(paginate(matches, page, per_page))
    }

    /// Assigns the next id, stamps timestamps and writes a new record.
    fn create<R: Record>(&self, mut record: R) -> Result<R, StorageError> {
        record.set_id(self.next_id::<R>()?);
        record.touch(true);
        self.write(&record)?;
        tracing::info!(kind = R::KIND, id = record.id(), "record created");
        Ok(record)
    }

    /// Overwrites an existing record.
    fn update<R: Record>(&self, mut record: R) -> Result<R, StorageError> {
        if !self.record_path::<R>(record.id()).is_file() {
            return Err(StorageError::NotFound {
                kind: R::KIND,
                id: record.id(),
            });
        }
        record.touch(false);
        self.write(&record)?;
        tracing::info!(kind = R::KIND, id = record.id(), "record updated");
        Ok(record)
    }

    /// Marks a live record as deleted.
    pub fn soft_delete<R: Record>(&self, id: u64) -> Result<R, StorageError> {
        let mut record: R = self.load(id)?;
        if record.is_deleted() {
            return Err(StorageError::Deleted { kind: R::KIND, id });
        }
        record.set_deleted(true);
        self.write(&record)?;
        tracing::info!(kind = R::KIND, id, "record soft-deleted");
        Ok(record)
    }

    /// Brings a soft-deleted record back.
    pub fn restore<R: Record>(&self, id: u64) -> Result<R, StorageError> {
        let mut record: R = self.load(id)?;
        if !record.is_deleted() {
            return Err(StorageError::NotDeleted { kind: R::KIND, id });
        }
        record.set_deleted(false);
        self.write(&record)?;
        tracing::info!(kind = R::KIND, id, "record restored");
        Ok(record)
    }

    /// Removes a soft-deleted record's file for good.
    pub fn hard_delete<R: Record>(&self, id: u64) -> Result<(), StorageError> {
        let record: R = self.load(id)?;
        if !record.is_deleted() {
            return Err(StorageError::NotDeleted { kind: R::KIND, id });
        }
        fs::remove_file(self.record_path::<R>(id))?;
        tracing::warn!(kind = R::KIND, id, "record hard-deleted");
        Ok(())
    }

    /// Creates the report when its id is `0`, updates it otherwise.
    pub fn save_report(&self, report: Report) -> Result<Report, StorageError> {
        if report.id == 0 {
            self.create(report)
        } else {
            self.update(report)
        }
    }

    /// Creates or updates an account, enforcing case-insensitive unique usernames.
    pub fn save_user(&self, user: User) -> Result<User, StorageError> {
        let wanted = user.username.to_lowercase();
        let taken = self
            .list::<User>()?
            .iter()
            .any(|u| u.id != user.id && u.username.to_lowercase() == wanted);
        if taken {
            return Err(StorageError::DuplicateUsername(user.username));
        }
        if user.id == 0 {
            self.create(user)
        } else {
            self.update(user)
        }
    }

    /// Writes the report to the outbox and marks it forwarded.
    ///
    /// Returns the updated report and the message path.
    pub fn forward_report(&self, id: u64) -> Result<(Report, PathBuf), StorageError> {
        let mut report: Report = self.load(id)?;
        if report.deleted {
            return Err(StorageError::Deleted {
                kind: Report::KIND,
                id,
            });
        }
        if report.is_forwarded() {
            return Err(StorageError::AlreadyForwarded(id));
        }
        let users = self.list::<User>()?;
        let to = recipients(&report, &users);
        let now = Utc::now();
        let path = write_forward(&self.outbox, &report, &to, now)?;
        report.forwarded_at = Some(now);
        self.write(&report)?;
        tracing::info!(id, recipients = to.len(), path = %path.display(), "report forwarded");
        Ok((report, path))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use tempfile::tempdir;

    use super::*;
    use crate::model::{
        Category, Priority, ReportDraft, ReportQuery, Role, UserDraft, UserQuery,
    };

    fn make_store() -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::with_path(dir.path()).unwrap();
        (dir, store)
    }

    fn make_report(summary: &str) -> Report {
        Report::from_draft(ReportDraft {
            caller_name: "Ada Lovelace".into(),
            caller_phone: "555-0100".into(),
            call_received: "2026-03-14 09:30".into(),
            location: "Harbour St".into(),
            category: Category::Theft,
            priority: Priority::Normal,
            departments: vec![],
            emergency_dispatched: false,
            follow_up: false,
            summary: summary.into(),
            narrative: String::new(),
        })
        .unwrap()
    }

    fn make_user(username: &str) -> User {
        User::from_draft(UserDraft {
            username: username.into(),
            full_name: "Jane Doe".into(),
            email: format!("{username}@example.org"),
            role: Role::Operator,
            active: true,
            forward_categories: vec![Category::Theft],
            password: "correct horse".into(),
            password_confirmation: "correct horse".into(),
        })
        .unwrap()
    }

    // --- create / load ---

    #[test]
    fn create_assigns_sequential_ids() {
        let (_dir, store) = make_store();
        let a = store.save_report(make_report("a")).unwrap();
        let b = store.save_report(make_report("b")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.load::<Report>(2).unwrap(), b);
    }

    #[test]
    fn load_missing_is_not_found() {
        let (_dir, store) = make_store();
        assert!(matches!(
            store.load::<Report>(9),
            Err(StorageError::NotFound { kind: "reports", id: 9 })
        ));
    }

    #[test]
    fn update_requires_existing_record() {
        let (_dir, store) = make_store();
        let mut report = make_report("ghost");
        report.id = 5;
        assert!(matches!(
            store.save_report(report),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn update_stamps_updated_at() {
        let (_dir, store) = make_store();
        let created = store.save_report(make_report("a")).unwrap();
        let mut edited = created.clone();
        edited.summary = "b".into();
        let saved = store.save_report(edited).unwrap();
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at >= created.updated_at);
        assert_eq!(store.load::<Report>(1).unwrap().summary, "b");
    }

    // --- list / search ---

    #[test]
    fn list_newest_first() {
        let (_dir, store) = make_store();
        for s in ["a", "b", "c"] {
            store.save_report(make_report(s)).unwrap();
        }
        let ids: Vec<u64> = store.list::<Report>().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn list_ignores_foreign_files() {
        let (dir, store) = make_store();
        store.save_report(make_report("a")).unwrap();
        fs::write(dir.path().join("reports").join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("reports").join("abc.json"), "{}").unwrap();
        assert_eq!(store.list::<Report>().unwrap().len(), 1);
    }

    #[test]
    fn search_filters_and_paginates() {
        let (_dir, store) = make_store();
        for i in 0..5 {
            store.save_report(make_report(&format!("bike {i}"))).unwrap();
        }
        store.save_report(make_report("dog")).unwrap();
        let query = ReportQuery {
            text: "BIKE".into(),
            ..Default::default()
        };
        let page = store.search::<Report>(&query, 1, 2).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.page_count, 3);
        let summaries: Vec<&str> = page.items.iter().map(|r| r.summary.as_str()).collect();
        assert_eq!(summaries, vec!["bike 2", "bike 1"]);
    }

    #[quickcheck]
    fn list_returns_every_created_record(n: u8) -> bool {
        let n = usize::from(n.min(15));
        let (_dir, store) = make_store();
        for i in 0..n {
            store.save_report(make_report(&i.to_string())).unwrap();
        }
        store.list::<Report>().unwrap().len() == n
    }

    // --- delete / restore ---

    #[test]
    fn soft_delete_hides_from_default_search() {
        let (_dir, store) = make_store();
        store.save_report(make_report("a")).unwrap();
        store.soft_delete::<Report>(1).unwrap();
        let page = store.search::<Report>(&ReportQuery::default(), 0, 10).unwrap();
        assert!(page.items.is_empty());
        let all = ReportQuery {
            include_deleted: true,
            ..Default::default()
        };
        assert_eq!(store.search::<Report>(&all, 0, 10).unwrap().total, 1);
    }

    #[test]
    fn soft_delete_twice_fails() {
        let (_dir, store) = make_store();
        store.save_report(make_report("a")).unwrap();
        store.soft_delete::<Report>(1).unwrap();
        assert!(matches!(
            store.soft_delete::<Report>(1),
            Err(StorageError::Deleted { .. })
        ));
    }

    #[test]
    fn restore_round_trip() {
        let (_dir, store) = make_store();
        store.save_report(make_report("a")).unwrap();
        assert!(matches!(
            store.restore::<Report>(1),
            Err(StorageError::NotDeleted { .. })
        ));
        store.soft_delete::<Report>(1).unwrap();
        let restored: Report = store.restore(1).unwrap();
        assert!(!restored.deleted);
    }

    #[test]
    fn hard_delete_requires_soft_delete() {
        let (_dir, store) = make_store();
        store.save_report(make_report("a")).unwrap();
        assert!(matches!(
            store.hard_delete::<Report>(1),
            Err(StorageError::NotDeleted { .. })
        ));
        store.soft_delete::<Report>(1).unwrap();
        store.hard_delete::<Report>(1).unwrap();
        assert!(matches!(
            store.load::<Report>(1),
            Err(StorageError::NotFound { .. })
        ));
    }

    // --- users ---

    #[test]
    fn usernames_unique_case_insensitive() {
        let (_dir, store) = make_store();
        store.save_user(make_user("jdoe")).unwrap();
        let mut dup = make_user("jdoe");
        dup.username = "JDoe".into();
        assert!(matches!(
            store.save_user(dup),
            Err(StorageError::DuplicateUsername(name)) if name == "JDoe"
        ));
    }

    #[test]
    fn user_can_be_resaved_under_own_name() {
        let (_dir, store) = make_store();
        let mut user = store.save_user(make_user("jdoe")).unwrap();
        user.full_name = "Janet Doe".into();
        let saved = store.save_user(user).unwrap();
        assert_eq!(store.load::<User>(saved.id).unwrap().full_name, "Janet Doe");
    }

    #[test]
    fn user_search() {
        let (_dir, store) = make_store();
        store.save_user(make_user("jdoe")).unwrap();
        store.save_user(make_user("asmith")).unwrap();
        let query = UserQuery {
            text: "smith".into(),
            ..Default::default()
        };
        let page = store.search::<User>(&query, 0, 10).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].username, "asmith");
    }

    // --- forward ---

    #[test]
    fn forward_writes_outbox_and_stamps_report() {
        let (_dir, store) = make_store();
        store.save_user(make_user("jdoe")).unwrap();
        store.save_report(make_report("bike")).unwrap();
        let (report, path) = store.forward_report(1).unwrap();
        assert!(report.forwarded_at.is_some());
        assert!(path.starts_with(store.outbox()));
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("To: jdoe@example.org\n"));
        assert!(store.load::<Report>(1).unwrap().is_forwarded());
    }

    #[test]
    fn forward_twice_fails() {
        let (_dir, store) = make_store();
        store.save_report(make_report("bike")).unwrap();
        store.forward_report(1).unwrap();
        assert!(matches!(
            store.forward_report(1),
            Err(StorageError::AlreadyForwarded(1))
        ));
    }

    #[test]
    fn forward_deleted_fails() {
        let (_dir, store) = make_store();
        store.save_report(make_report("bike")).unwrap();
        store.soft_delete::<Report>(1).unwrap();
        assert!(matches!(
            store.forward_report(1),
            Err(StorageError::Deleted { .. })
        ));
    }
}
