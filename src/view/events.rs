//! Events View Model
//!
//! Filterable, paginated event list. Every filter or page change issues
//! exactly one fetch; a filter change always returns to the first page.

use std::sync::Arc;

use super::state::LoadState;
use crate::client::AnomalyApi;
use crate::models::{AnomalyEvent, AnomalyEventFilter};

/// Rows per page
pub const PAGE_SIZE: u32 = 50;

/// Highest page index whose successor's offset still fits in a `u32`
pub const MAX_PAGE: u32 = u32::MAX / PAGE_SIZE - 1;

/// User-editable filters. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub is_alert: Option<bool>,
    pub alert_type: String,
    pub alert_level: String,
    pub user_id: String,
}

impl EventFilters {
    /// Whether no filter is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Events page state machine
pub struct EventsViewModel {
    api: Arc<dyn AnomalyApi>,
    filters: EventFilters,
    page: u32,
    state: LoadState<Vec<AnomalyEvent>>,
    last_row_count: Option<usize>,
}

impl EventsViewModel {
    /// Fresh view: no filters, first page, nothing fetched yet
    pub fn new(api: Arc<dyn AnomalyApi>) -> Self {
        Self::restore(api, EventFilters::default(), 0)
    }

    /// View positioned at an existing filter set and page (e.g. from a URL).
    /// Pages past [`MAX_PAGE`] are clamped.
    pub fn restore(api: Arc<dyn AnomalyApi>, filters: EventFilters, page: u32) -> Self {
        Self {
            api,
            filters,
            page: page.min(MAX_PAGE),
            state: LoadState::default(),
            last_row_count: None,
        }
    }

    pub fn filters(&self) -> &EventFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> &LoadState<Vec<AnomalyEvent>> {
        &self.state
    }

    /// Rows currently on screen
    pub fn events(&self) -> &[AnomalyEvent] {
        self.state.visible().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Request sent for the current filters and page
    pub fn request(&self) -> AnomalyEventFilter {
        let non_empty = |s: &String| Some(s.trim().to_string()).filter(|s| !s.is_empty());

        AnomalyEventFilter {
            is_alert: self.filters.is_alert,
            alert_type: non_empty(&self.filters.alert_type),
            alert_level: non_empty(&self.filters.alert_level),
            user_id: non_empty(&self.filters.user_id),
            limit: Some(PAGE_SIZE),
            offset: Some(self.page * PAGE_SIZE),
            ..Default::default()
        }
    }

    /// "Previous" is enabled past the first page
    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    /// "Next" is disabled once a fetch came back short of a full page.
    ///
    /// The backend reports no total, so a short page marks the end.
    pub fn can_go_next(&self) -> bool {
        self.page < MAX_PAGE && matches!(self.last_row_count, Some(n) if n >= PAGE_SIZE as usize)
    }

    /// Fetch the current page
    pub async fn load(&mut self) {
        let request = self.request();
        self.state = self.state.begin_loading();

        match self.api.list_events(&request).await {
            Ok(events) => {
                tracing::debug!(
                    page = self.page,
                    rows = events.len(),
                    "Loaded events"
                );
                self.last_row_count = Some(events.len());
                self.state = LoadState::Ready(events);
            }
            Err(e) => {
                tracing::warn!(page = self.page, error = %e, "Failed to load events");
                self.last_row_count = None;
                self.state = LoadState::Error(e.to_string());
            }
        }
    }

    /// Refresh button: fetch the current page again
    pub async fn reload(&mut self) {
        self.load().await;
    }

    /// Replace the whole filter set. A change resets to page 0 and fetches.
    pub async fn set_filters(&mut self, filters: EventFilters) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.page = 0;
        self.load().await;
    }

    pub async fn set_is_alert(&mut self, is_alert: Option<bool>) {
        let filters = EventFilters {
            is_alert,
            ..self.filters.clone()
        };
        self.set_filters(filters).await;
    }

    pub async fn set_alert_type(&mut self, alert_type: impl Into<String>) {
        let filters = EventFilters {
            alert_type: alert_type.into(),
            ..self.filters.clone()
        };
        self.set_filters(filters).await;
    }

    pub async fn set_alert_level(&mut self, alert_level: impl Into<String>) {
        let filters = EventFilters {
            alert_level: alert_level.into(),
            ..self.filters.clone()
        };
        self.set_filters(filters).await;
    }

    pub async fn set_user_id(&mut self, user_id: impl Into<String>) {
        let filters = EventFilters {
            user_id: user_id.into(),
            ..self.filters.clone()
        };
        self.set_filters(filters).await;
    }

    /// Jump to a page; fetches only when the page actually changes
    pub async fn go_to_page(&mut self, page: u32) {
        let page = page.min(MAX_PAGE);
        if page == self.page {
            return;
        }
        self.page = page;
        self.load().await;
    }

    /// Advance one page if "Next" is enabled
    pub async fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.go_to_page(self.page + 1).await;
        true
    }

    /// Go back one page if "Previous" is enabled
    pub async fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.go_to_page(self.page - 1).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{sample_events, MockApi};

    #[tokio::test]
    async fn test_initial_load_first_page() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;

        assert_eq!(vm.events().len(), 50);
        let filters = api.list_filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].limit, Some(50));
        assert_eq!(filters[0].offset, Some(0));
        assert!(filters[0].alert_type.is_none());
        assert!(filters[0].is_alert.is_none());
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        assert!(vm.next_page().await);
        assert!(vm.next_page().await);
        assert_eq!(vm.page(), 2);

        let before = api.count("list_events");
        vm.set_alert_type("latency").await;

        assert_eq!(vm.page(), 0);
        assert_eq!(api.count("list_events"), before + 1);
        let last = api.list_filters().pop().unwrap();
        assert_eq!(last.offset, Some(0));
        assert_eq!(last.alert_type.as_deref(), Some("latency"));
    }

    #[tokio::test]
    async fn test_each_filter_field_resets_page() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::restore(api.clone(), EventFilters::default(), 1);

        vm.set_is_alert(Some(true)).await;
        assert_eq!(vm.page(), 0);

        vm.go_to_page(1).await;
        vm.set_alert_level("CRITICAL").await;
        assert_eq!(vm.page(), 0);

        vm.go_to_page(1).await;
        vm.set_user_id("u-1").await;
        assert_eq!(vm.page(), 0);

        let offsets: Vec<_> = api.list_filters().iter().map(|f| f.offset).collect();
        assert_eq!(
            offsets,
            vec![Some(0), Some(50), Some(0), Some(50), Some(0)]
        );
        let last = api.list_filters().pop().unwrap();
        assert_eq!(last.is_alert, Some(true));
        assert_eq!(last.alert_level.as_deref(), Some("CRITICAL"));
        assert_eq!(last.user_id.as_deref(), Some("u-1"));
    }

    #[tokio::test]
    async fn test_unchanged_filter_does_not_fetch() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.set_alert_type("").await;
        vm.set_is_alert(None).await;
        assert_eq!(api.count("list_events"), 0);
    }

    #[tokio::test]
    async fn test_page_offsets() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        vm.next_page().await;
        vm.next_page().await;
        vm.previous_page().await;

        let offsets: Vec<_> = api.list_filters().iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![Some(0), Some(50), Some(100), Some(50)]);
    }

    #[tokio::test]
    async fn test_next_disabled_on_short_page() {
        // 120 events: pages of 50, 50, 20
        let api = Arc::new(MockApi::with_events(sample_events(120)));
        let mut vm = EventsViewModel::new(api.clone());

        assert!(!vm.can_go_next());
        assert!(!vm.can_go_previous());

        vm.load().await;
        assert!(vm.can_go_next());
        vm.next_page().await;
        assert!(vm.can_go_next());
        assert!(vm.can_go_previous());
        vm.next_page().await;

        assert_eq!(vm.events().len(), 20);
        assert!(!vm.can_go_next());
        assert!(!vm.next_page().await);
        assert_eq!(api.count("list_events"), 3);
    }

    #[tokio::test]
    async fn test_exact_full_page_keeps_next_enabled() {
        let api = Arc::new(MockApi::with_events(sample_events(50)));
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        assert!(vm.can_go_next());

        vm.next_page().await;
        assert!(vm.events().is_empty());
        assert!(!vm.can_go_next());
    }

    #[tokio::test]
    async fn test_previous_disabled_on_first_page() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        assert!(!vm.previous_page().await);
        assert_eq!(api.count("list_events"), 1);
    }

    #[tokio::test]
    async fn test_error_then_reload() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        api.fail("list_events");
        vm.load().await;
        assert!(vm.state().error().is_some());
        assert!(vm.events().is_empty());

        api.recover();
        vm.reload().await;
        assert!(vm.state().error().is_none());
        assert_eq!(vm.events().len(), 50);
    }

    #[tokio::test]
    async fn test_failed_filter_change_disables_next() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::new(api.clone());
        vm.load().await;
        assert!(vm.can_go_next());

        api.fail("list_events");
        vm.set_alert_type("latency").await;
        assert!(vm.state().error().is_some());
        assert!(!vm.can_go_next());
        assert!(!vm.next_page().await);
        assert_eq!(vm.page(), 0);
        assert_eq!(api.count("list_events"), 2);
    }

    #[tokio::test]
    async fn test_oversized_page_is_clamped() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventsViewModel::restore(api.clone(), EventFilters::default(), u32::MAX);
        assert_eq!(vm.page(), MAX_PAGE);

        vm.load().await;
        assert!(vm.events().is_empty());
        assert!(!vm.can_go_next());

        vm.go_to_page(u32::MAX).await;
        assert_eq!(api.count("list_events"), 1);
        let last = api.list_filters().pop().unwrap();
        assert_eq!(last.offset, Some(MAX_PAGE * PAGE_SIZE));
        assert!(MAX_PAGE.checked_add(1).and_then(|p| p.checked_mul(PAGE_SIZE)).is_some());
    }

    #[test]
    fn test_request_trims_blank_filters() {
        let api = Arc::new(MockApi::new());
        let filters = EventFilters {
            alert_type: "  ".to_string(),
            user_id: " u-9 ".to_string(),
            ..Default::default()
        };
        let vm = EventsViewModel::restore(api, filters, 3);
        let request = vm.request();

        assert!(request.alert_type.is_none());
        assert_eq!(request.user_id.as_deref(), Some("u-9"));
        assert_eq!(request.offset, Some(150));
        assert!(!vm.filters().is_empty());
    }
}
