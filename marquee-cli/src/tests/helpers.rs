//! Test helpers for writing rank requests and events databases.

use camino::{Utf8Path, Utf8PathBuf};
use marquee_core::test_support::{SqliteFixture, sample_event, write_sqlite_database};
use marquee_core::{Category, PurchaseStatus, TicketPurchase};
use tempfile::TempDir;

/// User id with a completed purchase in [`write_events_db`].
pub(super) const REGULAR_USER: u64 = 7;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Scratch directory holding a request file and an events database.
pub(super) struct RankWorkspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request_path: Utf8PathBuf,
    pub(super) events_db: Utf8PathBuf,
}

impl RankWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            request_path: root.join("request.json"),
            events_db: root.join("events.db"),
            root,
            _dir: dir,
        }
    }

    pub(super) fn write_request(&self, json: &str) {
        write_utf8(&self.request_path, json.as_bytes());
    }

    /// Populate the events database with three listed events: a concert
    /// (id 1), a football match (id 2) and an uncategorised talk (id 3).
    pub(super) fn write_events_db(&self) {
        let concert = Category::new(1, "Concert");
        let football = Category::new(2, "Football");
        let fixture = SqliteFixture::default()
            .with_events([
                sample_event(1).with_category(concert.clone()),
                sample_event(2).with_category(football),
                sample_event(3),
            ])
            .with_purchases([TicketPurchase::new(
                REGULAR_USER,
                1,
                Some(concert.id),
                PurchaseStatus::Completed,
            )]);
        write_sqlite_database(self.events_db.as_std_path(), &fixture).expect("write events db");
    }
}
