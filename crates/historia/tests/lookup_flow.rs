//! End-to-end: search a day, open an event, favorite it, reload from disk.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use historia::app::{AppController, DetailPayload, Notice, Notifier, Route};
use historia::data::{Category, FavoritesStore, FileStore, HistoryData, HistoryEvent};
use historia::error::Result;
use historia::providers::HistoryLookupClient;

struct ChristmasOnly;

impl HistoryLookupClient for ChristmasOnly {
    fn name(&self) -> &'static str {
        "Christmas only"
    }

    fn fetch(&self, month: &str, day: &str) -> Result<HistoryData> {
        let mut data = HistoryData::default();
        if (month, day) == ("12", "25") {
            data.events
                .push(HistoryEvent::new("800", "Charlemagne crowned"));
        }
        Ok(data)
    }
}

#[derive(Clone, Default)]
struct Notices(Rc<RefCell<Vec<Notice>>>);

impl Notifier for Notices {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

fn controller(dir: &std::path::Path, notices: &Notices) -> AppController<FileStore> {
    AppController::new(
        Arc::new(ChristmasOnly),
        FavoritesStore::new(FileStore::new(dir)),
        Box::new(notices.clone()),
    )
}

#[test]
fn search_select_and_favorite() {
    let dir = tempfile::tempdir().unwrap();
    let notices = Notices::default();
    let mut app = controller(dir.path(), &notices);

    assert!(app.search("25/12"));
    assert!(app.wait_for_lookup(Duration::from_secs(5)));

    let results = app.results().unwrap();
    assert_eq!(results.items(&Category::Events).len(), 1);
    for tab in [Category::Deaths, Category::Births] {
        assert!(results.items(&tab).is_empty());
    }
    assert_eq!(
        Category::Deaths.empty_message(),
        "Nenhuma morte registrada para esta data"
    );

    let payload = app.select_event(&Category::Events, 0).unwrap();
    assert_eq!(
        payload,
        DetailPayload::new(
            HistoryEvent::new("800", "Charlemagne crowned"),
            Category::Events,
            "25 de dezembro",
        )
    );

    assert_eq!(app.toggle_favorite(), Some(true));
    assert_eq!(*notices.0.borrow(), [Notice::FavoriteAdded]);

    // A fresh controller over the same directory sees the favorite
    let mut reopened = controller(dir.path(), &notices);
    let favorites = reopened.favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].event.year, "800");
    assert_eq!(favorites[0].category, Category::Events);
    assert_eq!(favorites[0].date, "25 de dezembro");
    assert!(dir.path().join("historyFavorites.json").exists());
}

#[test]
fn details_without_payload_go_home() {
    let dir = tempfile::tempdir().unwrap();
    let notices = Notices::default();
    let mut app = controller(dir.path(), &notices);

    assert!(!app.open_details(None));
    assert_eq!(app.route(), &Route::Home);
    assert!(notices.0.borrow().is_empty());
}

#[test]
fn day_without_facts_shows_empty_tabs() {
    let dir = tempfile::tempdir().unwrap();
    let notices = Notices::default();
    let mut app = controller(dir.path(), &notices);

    assert!(app.search("1/1"));
    assert!(app.wait_for_lookup(Duration::from_secs(5)));

    let results = app.results().unwrap();
    assert_eq!(results.date_label, "1 de janeiro");
    for tab in Category::TABS {
        assert!(results.items(&tab).is_empty());
    }
    assert!(app.select_event(&Category::Events, 0).is_none());
}
