//! Dashboard composition
//!
//! `Dashboard` ties the API client, the response cache and a view together and
//! implements every resource load and widget initializer the refresh
//! scheduler drives.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::data::{
    ApiClient, ArticlesPage, FetchOptions, PostsPage, RequestsPage, Resource, SearchPage,
    StaticContent, Ticket, Widget,
};
use crate::refresh::DashboardLoader;
use crate::ui::format::{
    format_relative_time, highlight_match, truncate_excerpt, UpdateCategory, EXCERPT_LENGTH,
};
use crate::ui::{ContainerId, DashboardView, MonthGrid, Panel, PanelItem};

/// Cache key for the current user's tickets
pub const MY_TICKETS_CACHE_KEY: &str = "my-tickets";

/// Tickets shown per ticket panel
const TICKETS_SHOWN: usize = 5;

/// Shortest search query that produces suggestions
const MIN_QUERY_LENGTH: usize = 2;

/// Ticket statuses listed by default
pub const DEFAULT_STATUS_FILTER: &str = "open,pending,hold,new";

/// Organization used for the county tickets panel
pub const DEFAULT_ORGANIZATION: &str = "current";

/// Help-center section holding the updates feed
pub const DEFAULT_UPDATES_SECTION: &str = "360000000123";

/// What the dashboard loads and how
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Comma-separated ticket statuses
    pub status_filter: String,
    pub organization_id: String,
    pub updates_section: String,
    /// Query for the search initializer, if any
    pub search_query: Option<String>,
    pub content: StaticContent,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            status_filter: DEFAULT_STATUS_FILTER.to_string(),
            organization_id: DEFAULT_ORGANIZATION.to_string(),
            updates_section: DEFAULT_UPDATES_SECTION.to_string(),
            search_query: None,
            content: StaticContent::default(),
        }
    }
}

/// The help-desk homepage dashboard
pub struct Dashboard {
    client: ApiClient,
    cache: Arc<ResponseCache>,
    view: Arc<dyn DashboardView>,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(
        client: ApiClient,
        cache: Arc<ResponseCache>,
        view: Arc<dyn DashboardView>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            client,
            cache,
            view,
            settings,
        }
    }

    fn container_present(&self, id: ContainerId) -> bool {
        self.view.has_container(id)
    }

    /// Parses a response body, logging when it has an unexpected shape
    fn parse<T: DeserializeOwned>(&self, resource: &str, value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(
                    event = "dashboard.unexpected_shape",
                    resource = resource,
                    error = %e,
                    "Response did not have the expected shape"
                );
                None
            }
        }
    }

    fn ticket_options(&self) -> FetchOptions {
        FetchOptions::get().param("status", &self.settings.status_filter)
    }

    /// Loads the current user's tickets, serving fresh cached data first
    pub async fn load_my_tickets(&self) {
        let container = ContainerId::MyTickets;
        if !self.container_present(container) {
            return;
        }

        if let Some(cached) = self.cache.get(MY_TICKETS_CACHE_KEY) {
            if let Some(tickets) = self.parse::<Vec<Ticket>>("my_tickets", cached) {
                self.render_tickets(container, &tickets);
                return;
            }
        }

        let fetched = self
            .client
            .fetch_resource("/requests", &self.ticket_options())
            .await
            .and_then(|mut body| body.get_mut("requests").map(Value::take))
            .and_then(|requests| {
                let tickets = self.parse::<Vec<Ticket>>("my_tickets", requests.clone())?;
                Some((requests, tickets))
            });

        match fetched {
            Some((requests, tickets)) => {
                self.cache.set(MY_TICKETS_CACHE_KEY, requests);
                self.render_tickets(container, &tickets);
            }
            None => self.view.render(container, Panel::no_data("No active tickets")),
        }
    }

    /// Loads open tickets for the configured organization
    pub async fn load_county_tickets(&self) {
        let container = ContainerId::CountyTickets;
        if !self.container_present(container) {
            return;
        }

        let options = self
            .ticket_options()
            .param("organization_id", &self.settings.organization_id);
        let page: Option<RequestsPage> = self.fetch_page("/requests", &options, "county_tickets").await;

        match page {
            Some(page) => self.render_tickets(container, &page.requests),
            None => self.view.render(container, Panel::no_data("No county tickets")),
        }
    }

    fn render_tickets(&self, container: ContainerId, tickets: &[Ticket]) {
        if tickets.is_empty() {
            self.view.render(container, Panel::no_data("No tickets to display"));
            return;
        }

        let now = Utc::now();
        let items = tickets
            .iter()
            .take(TICKETS_SHOWN)
            .map(|ticket| {
                let mut item = PanelItem::new(format!("#{} {}", ticket.id, ticket.subject))
                    .link(&ticket.url)
                    .badge(&ticket.status);
                if let Some(updated_at) = ticket.updated_at {
                    item = item.meta(format!("Updated {}", format_relative_time(updated_at, now)));
                }
                item
            })
            .collect();

        self.view.render(container, Panel::Items(items));
    }

    /// Loads the most recently updated articles
    pub async fn load_recent_articles(&self) {
        let container = ContainerId::RecentArticles;
        if !self.container_present(container) {
            return;
        }

        let options = FetchOptions::get()
            .param("sort_by", "updated_at")
            .param("sort_order", "desc")
            .param("per_page", 6);
        let page: Option<ArticlesPage> =
            self.fetch_page("/help_center/articles", &options, "recent_articles").await;

        let Some(page) = page else {
            self.view.render(container, Panel::no_data("No recent articles"));
            return;
        };

        let now = Utc::now();
        let items = page
            .articles
            .iter()
            .map(|article| {
                let mut item = PanelItem::new(&article.title).link(&article.html_url);
                if let Some(updated_at) = article.updated_at {
                    item = item.meta(format!("Updated {}", format_relative_time(updated_at, now)));
                }
                item
            })
            .collect();

        self.view.render(container, Panel::Items(items));
    }

    /// Loads the newest community posts
    pub async fn load_community_activity(&self) {
        let container = ContainerId::CommunityQuestions;
        if !self.container_present(container) {
            return;
        }

        let options = FetchOptions::get()
            .param("sort_by", "created_at")
            .param("sort_order", "desc")
            .param("per_page", 5);
        let page: Option<PostsPage> =
            self.fetch_page("/community/posts", &options, "community_activity").await;

        let Some(page) = page else {
            self.view.render(container, Panel::no_data("No community activity"));
            return;
        };

        let items = page
            .posts
            .iter()
            .map(|post| {
                PanelItem::new(&post.title)
                    .link(&post.html_url)
                    .meta(format!("by {} • {} replies", post.author.name, post.comment_count))
            })
            .collect();

        self.view.render(container, Panel::Items(items));
    }

    /// Loads announcements from the updates section
    pub async fn load_updates_feed(&self) {
        let container = ContainerId::UpdatesFeed;
        if !self.container_present(container) {
            return;
        }

        let endpoint = format!("/help_center/sections/{}/articles", self.settings.updates_section);
        let options = FetchOptions::get()
            .param("sort_by", "created_at")
            .param("sort_order", "desc")
            .param("per_page", 10);
        let page: Option<ArticlesPage> = self.fetch_page(&endpoint, &options, "updates_feed").await;

        let Some(page) = page else {
            self.view.render(container, Panel::no_data("No updates"));
            return;
        };

        let now = Utc::now();
        let items = page
            .articles
            .iter()
            .map(|article| {
                let category = UpdateCategory::detect(article);
                let mut item = PanelItem::new(&article.title)
                    .link(&article.html_url)
                    .badge(category.label())
                    .detail(truncate_excerpt(
                        article.body.as_deref().unwrap_or_default(),
                        EXCERPT_LENGTH,
                    ));
                if let Some(created_at) = article.created_at {
                    item = item.meta(format_relative_time(created_at, now));
                }
                item
            })
            .collect();

        self.view.render(container, Panel::Items(items));
    }

    /// Loads promoted articles, numbered
    pub async fn load_popular_articles(&self) {
        let container = ContainerId::PopularArticles;
        if !self.container_present(container) {
            return;
        }

        let options = FetchOptions::get().param("sort_by", "promoted").param("per_page", 5);
        let page: Option<ArticlesPage> =
            self.fetch_page("/help_center/articles", &options, "popular_articles").await;

        let Some(page) = page else {
            self.view.render(container, Panel::no_data("No popular articles"));
            return;
        };

        let items = page
            .articles
            .iter()
            .enumerate()
            .map(|(index, article)| {
                PanelItem::new(&article.title)
                    .link(&article.html_url)
                    .badge((index + 1).to_string())
            })
            .collect();

        self.view.render(container, Panel::Items(items));
    }

    /// Shows the configured deadlines
    pub fn load_due_this_week(&self) {
        let container = ContainerId::DueThisWeek;
        if !self.container_present(container) {
            return;
        }

        let due = &self.settings.content.due_this_week;
        if due.is_empty() {
            self.view.render(container, Panel::no_data("Nothing due this week"));
            return;
        }

        let items = due
            .iter()
            .map(|item| PanelItem::new(&item.title).badge(&item.label))
            .collect();
        self.view.render(container, Panel::Items(items));
    }

    /// Shows the configured system status snapshot
    pub fn check_system_status(&self) {
        let container = ContainerId::StatusSnapshot;
        if !self.container_present(container) {
            return;
        }

        let systems = &self.settings.content.systems;
        if systems.is_empty() {
            self.view.render(container, Panel::no_data("No status available"));
            return;
        }

        let items = systems
            .iter()
            .map(|system| PanelItem::new(&system.name).badge(system.status.as_str()))
            .collect();
        self.view.render(container, Panel::Items(items));
    }

    /// Renders this month's calendar and the agenda
    pub fn initialize_calendar(&self) {
        if !self.container_present(ContainerId::CalendarWidget)
            || !self.container_present(ContainerId::AgendaList)
        {
            return;
        }

        let today = chrono::Local::now().date_naive();
        self.view.render(
            ContainerId::CalendarWidget,
            Panel::Calendar(MonthGrid::for_date(today)),
        );

        let agenda = &self.settings.content.agenda;
        let panel = if agenda.is_empty() {
            Panel::no_data("No upcoming events")
        } else {
            Panel::Items(
                agenda
                    .iter()
                    .map(|item| PanelItem::new(&item.title).badge(&item.date))
                    .collect(),
            )
        };
        self.view.render(ContainerId::AgendaList, panel);
    }

    /// Runs the configured search query, if any
    pub async fn initialize_search(&self) {
        if let Some(query) = self.settings.search_query.as_deref() {
            self.load_search_suggestions(query).await;
        }
    }

    /// Shows article suggestions for a search query
    ///
    /// Queries shorter than two characters, failed searches and empty result
    /// sets hide the suggestions container.
    pub async fn load_search_suggestions(&self, query: &str) {
        let container = ContainerId::SearchSuggestions;
        if !self.container_present(container) {
            return;
        }

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            self.view.render(container, Panel::Hidden);
            return;
        }

        let options = FetchOptions::get().param("query", query).param("per_page", 5);
        let page: Option<SearchPage> = self
            .fetch_page("/help_center/articles/search", &options, "search")
            .await;

        match page {
            Some(page) if !page.results.is_empty() => {
                let items = page
                    .results
                    .iter()
                    .map(|result| {
                        let mut item =
                            PanelItem::new(highlight_match(&result.title, query)).link(&result.html_url);
                        if let Some(section) = &result.section {
                            item = item.meta(&section.name);
                        }
                        item
                    })
                    .collect();
                self.view.render(container, Panel::Items(items));
            }
            _ => self.view.render(container, Panel::Hidden),
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &FetchOptions,
        resource: &str,
    ) -> Option<T> {
        let value = self.client.fetch_resource(endpoint, options).await?;
        self.parse(resource, value)
    }
}

#[async_trait]
impl DashboardLoader for Dashboard {
    fn is_dashboard_present(&self) -> bool {
        self.view.has_dashboard()
    }

    async fn load(&self, resource: Resource) {
        match resource {
            Resource::MyTickets => self.load_my_tickets().await,
            Resource::CountyTickets => self.load_county_tickets().await,
            Resource::RecentArticles => self.load_recent_articles().await,
            Resource::CommunityActivity => self.load_community_activity().await,
            Resource::UpdatesFeed => self.load_updates_feed().await,
            Resource::PopularArticles => self.load_popular_articles().await,
            Resource::DueThisWeek => self.load_due_this_week(),
            Resource::SystemStatus => self.check_system_status(),
        }
    }

    async fn init(&self, widget: Widget) {
        match widget {
            Widget::Calendar => self.initialize_calendar(),
            Widget::Tabs => self.view.bind_tabs(),
            Widget::Filters => self.view.bind_filters(),
            Widget::Search => self.initialize_search().await,
        }
    }
}
