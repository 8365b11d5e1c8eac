//! Dashboard view contract
//!
//! Loaders never format output themselves. They hand structured `Panel`s to a
//! `DashboardView`, addressed by `ContainerId`, and the view decides how to
//! show them.

pub mod calendar;
pub mod format;
pub mod recording;
pub mod terminal;

pub use calendar::MonthGrid;
pub use recording::RecordingView;
pub use terminal::TerminalView;

/// Containers a view can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerId {
    MyTickets,
    CountyTickets,
    RecentArticles,
    CommunityQuestions,
    CalendarWidget,
    AgendaList,
    UpdatesFeed,
    PopularArticles,
    DueThisWeek,
    StatusSnapshot,
    SearchSuggestions,
}

impl ContainerId {
    pub const ALL: [ContainerId; 11] = [
        ContainerId::MyTickets,
        ContainerId::CountyTickets,
        ContainerId::RecentArticles,
        ContainerId::CommunityQuestions,
        ContainerId::CalendarWidget,
        ContainerId::AgendaList,
        ContainerId::UpdatesFeed,
        ContainerId::PopularArticles,
        ContainerId::DueThisWeek,
        ContainerId::StatusSnapshot,
        ContainerId::SearchSuggestions,
    ];

    /// Element id of the container
    pub fn id(&self) -> &'static str {
        match self {
            ContainerId::MyTickets => "my-tickets",
            ContainerId::CountyTickets => "county-tickets",
            ContainerId::RecentArticles => "recent-articles",
            ContainerId::CommunityQuestions => "community-questions",
            ContainerId::CalendarWidget => "calendar-widget",
            ContainerId::AgendaList => "agenda-list",
            ContainerId::UpdatesFeed => "updates-feed",
            ContainerId::PopularArticles => "popular-articles",
            ContainerId::DueThisWeek => "due-this-week",
            ContainerId::StatusSnapshot => "status-snapshot",
            ContainerId::SearchSuggestions => "search-suggestions",
        }
    }

    /// Human-readable heading
    pub fn title(&self) -> &'static str {
        match self {
            ContainerId::MyTickets => "My Tickets",
            ContainerId::CountyTickets => "County Tickets",
            ContainerId::RecentArticles => "Recent Articles",
            ContainerId::CommunityQuestions => "Community Questions",
            ContainerId::CalendarWidget => "Calendar",
            ContainerId::AgendaList => "Agenda",
            ContainerId::UpdatesFeed => "Updates",
            ContainerId::PopularArticles => "Popular Articles",
            ContainerId::DueThisWeek => "Due This Week",
            ContainerId::StatusSnapshot => "System Status",
            ContainerId::SearchSuggestions => "Search Suggestions",
        }
    }
}

/// One row of a list panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelItem {
    pub title: String,
    pub link: Option<String>,
    /// Short tag such as a ticket status, category or rank
    pub badge: Option<String>,
    /// Secondary line, e.g. "Updated 3 hours ago"
    pub meta: Option<String>,
    /// Longer text such as an excerpt
    pub detail: Option<String>,
}

impl PanelItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Content handed to a container
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Items(Vec<PanelItem>),
    /// Placeholder shown when a load produced nothing
    NoData(String),
    Calendar(MonthGrid),
    /// Container should be collapsed
    Hidden,
}

impl Panel {
    pub fn no_data(message: impl Into<String>) -> Self {
        Panel::NoData(message.into())
    }
}

/// Where the dashboard paints its panels
///
/// Implementations must be shareable between tasks; renders for different
/// containers may arrive in any order.
pub trait DashboardView: Send + Sync {
    /// Whether the dashboard root is present at all
    fn has_dashboard(&self) -> bool;

    /// Whether a given container is present
    fn has_container(&self, id: ContainerId) -> bool;

    /// Replaces the content of a container
    fn render(&self, id: ContainerId, panel: Panel);

    /// Hook for wiring tab navigation
    fn bind_tabs(&self) {}

    /// Hook for wiring filter controls
    fn bind_filters(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_ids_match_element_ids() {
        let ids: Vec<_> = ContainerId::ALL.iter().map(|c| c.id()).collect();

        assert_eq!(
            ids,
            vec![
                "my-tickets",
                "county-tickets",
                "recent-articles",
                "community-questions",
                "calendar-widget",
                "agenda-list",
                "updates-feed",
                "popular-articles",
                "due-this-week",
                "status-snapshot",
                "search-suggestions",
            ]
        );
    }

    #[test]
    fn test_panel_item_builder() {
        let item = PanelItem::new("Printer offline")
            .link("/requests/7")
            .badge("open")
            .meta("Updated just now");

        assert_eq!(item.title, "Printer offline");
        assert_eq!(item.link.as_deref(), Some("/requests/7"));
        assert_eq!(item.badge.as_deref(), Some("open"));
        assert_eq!(item.meta.as_deref(), Some("Updated just now"));
        assert!(item.detail.is_none());
    }
}
