//! Navigation state and notices
//!
//! `Route` is where the user is, `ResultsView` and `DetailView` are what
//! the presentation layer renders, and `Notice` is what it toasts.

use serde::{Deserialize, Serialize};

use crate::data::types::{Category, FavoriteRecord, HistoryData, HistoryEvent};
use crate::date::RouteKey;

/// Views the user can be on
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Results(RouteKey),
    EventDetails(DetailPayload),
    Favorites,
}

/// Hand-off from a results or favorites view to the details view
///
/// Carries exactly the event, its category, and the date label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub event: HistoryEvent,
    pub category: Category,
    pub date: String,
}

impl DetailPayload {
    pub fn new(event: HistoryEvent, category: Category, date: impl Into<String>) -> Self {
        Self {
            event,
            category,
            date: date.into(),
        }
    }

    pub fn from_record(record: &FavoriteRecord) -> Self {
        Self::new(record.event.clone(), record.category.clone(), &record.date)
    }
}

/// Progress of the lookup behind a results view
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Loading,
    Loaded(HistoryData),
    /// Failed lookups keep no data, only the error text
    Failed(String),
}

/// A results view for one day
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub route: RouteKey,
    /// e.g. "25 de dezembro"
    pub date_label: String,
    /// Lookup generation this view is waiting on
    pub generation: u64,
    pub state: LookupState,
}

impl ResultsView {
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LookupState::Loading)
    }

    /// Items of one tab; empty while loading or after a failure
    pub fn items(&self, category: &Category) -> &[HistoryEvent] {
        match &self.state {
            LookupState::Loaded(data) => data.for_category(category),
            _ => &[],
        }
    }
}

/// The event details view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub payload: DetailPayload,
    pub is_favorited: bool,
}

/// User-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyDate,
    InvalidDate,
    LookupFailed,
    FavoriteAdded,
    FavoriteRemoved,
    /// Removed from the favorites page rather than the details view
    FavoriteRemovedFromList,
    SaveFailed,
    Copied,
    ShareFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::EmptyDate => "Ops! 📅",
            Notice::InvalidDate => "Data inválida! ❌",
            Notice::LookupFailed => "Erro na busca! 😔",
            Notice::FavoriteAdded => "Adicionado aos favoritos! ⭐",
            Notice::FavoriteRemoved => "Removido dos favoritos! 💔",
            Notice::FavoriteRemovedFromList => "Removido dos favoritos! 🗑️",
            Notice::SaveFailed => "Erro ao salvar 😔",
            Notice::Copied => "Copiado! 📋",
            Notice::ShareFailed => "Erro ao compartilhar 😔",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notice::EmptyDate => "Digite uma data no formato DD/MM",
            Notice::InvalidDate => "Use o formato DD/MM (exemplo: 25/12)",
            Notice::LookupFailed => {
                "Não foi possível carregar os dados históricos. Tente novamente."
            }
            Notice::FavoriteAdded => "Evento salvo na sua lista de favoritos",
            Notice::FavoriteRemoved | Notice::FavoriteRemovedFromList => {
                "Evento removido da sua lista de favoritos"
            }
            Notice::SaveFailed => "Não foi possível salvar seus favoritos",
            Notice::Copied => "Texto copiado para a área de transferência",
            Notice::ShareFailed => "Não foi possível compartilhar este evento",
        }
    }

    /// Rendered in the destructive (error) style
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::EmptyDate
                | Notice::InvalidDate
                | Notice::LookupFailed
                | Notice::SaveFailed
                | Notice::ShareFailed
        )
    }
}

/// Sink for notices (toasts, stderr, a test recorder)
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Events delivered to the controller from worker threads
pub(crate) enum AppEvent {
    LookupResolved {
        generation: u64,
        result: Result<HistoryData, String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_record() {
        let record = FavoriteRecord::new(
            HistoryEvent::new("1969", "Moon landing"),
            Category::Events,
            "20 de julho",
        );
        let payload = DetailPayload::from_record(&record);
        assert_eq!(payload.event, record.event);
        assert_eq!(payload.category, Category::Events);
        assert_eq!(payload.date, "20 de julho");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = DetailPayload::new(
            HistoryEvent::new("800", "Charlemagne crowned"),
            Category::Events,
            "25 de dezembro",
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "event": {"year": "800", "text": "Charlemagne crowned"},
                "category": "events",
                "date": "25 de dezembro"
            })
        );
    }

    #[test]
    fn test_results_items_only_when_loaded() {
        let mut view = ResultsView {
            route: RouteKey::new("12", "25"),
            date_label: "25 de dezembro".to_string(),
            generation: 1,
            state: LookupState::Loading,
        };
        assert!(view.is_loading());
        assert!(view.items(&Category::Events).is_empty());

        view.state = LookupState::Loaded(HistoryData {
            events: vec![HistoryEvent::new("800", "Charlemagne crowned")],
            ..Default::default()
        });
        assert_eq!(view.items(&Category::Events).len(), 1);
        assert!(view.items(&Category::Births).is_empty());
    }

    #[test]
    fn test_notice_styles() {
        assert!(Notice::InvalidDate.is_error());
        assert!(Notice::LookupFailed.is_error());
        assert!(!Notice::FavoriteAdded.is_error());
        assert!(!Notice::Copied.is_error());
        assert_eq!(
            Notice::FavoriteRemovedFromList.description(),
            Notice::FavoriteRemoved.description()
        );
    }
}
