//! Core data models for the help-desk dashboard
//!
//! This module contains the records returned by the help-desk API (tickets,
//! articles, community posts, search results), the envelopes they arrive in,
//! and the named resources the dashboard loads.

pub mod client;
pub mod content;

pub use client::{ApiClient, ApiError, FetchOptions, API_BASE};
pub use content::{AgendaItem, ContentError, DueItem, ServiceState, StaticContent, SystemStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A support request as listed by `/requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    pub id: u64,
    /// Zendesk status: new, open, pending, hold, solved, closed
    pub status: String,
    pub subject: String,
    pub url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A help-center article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    /// HTML body, only used for excerpts
    pub body: Option<String>,
    pub label_names: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Author reference embedded in a community post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
}

/// A community forum post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub author: Author,
    pub comment_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Section reference embedded in a search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRef {
    pub name: String,
}

/// A help-center search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub section: Option<SectionRef>,
}

/// `{ "requests": [...] }`
#[derive(Debug, Deserialize)]
pub struct RequestsPage {
    pub requests: Vec<Ticket>,
}

/// `{ "articles": [...] }`
#[derive(Debug, Deserialize)]
pub struct ArticlesPage {
    pub articles: Vec<Article>,
}

/// `{ "posts": [...] }`
#[derive(Debug, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
}

/// `{ "results": [...] }`
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
}

/// One named category of dashboard data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    MyTickets,
    CountyTickets,
    RecentArticles,
    CommunityActivity,
    UpdatesFeed,
    PopularArticles,
    DueThisWeek,
    SystemStatus,
}

impl Resource {
    /// Every resource, in startup order
    pub const ALL: [Resource; 8] = [
        Resource::MyTickets,
        Resource::CountyTickets,
        Resource::RecentArticles,
        Resource::CommunityActivity,
        Resource::UpdatesFeed,
        Resource::PopularArticles,
        Resource::DueThisWeek,
        Resource::SystemStatus,
    ];

    /// Resources re-loaded on every refresh cycle
    pub const PERIODIC: [Resource; 3] = [
        Resource::MyTickets,
        Resource::CountyTickets,
        Resource::SystemStatus,
    ];

    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Resource::MyTickets => "my_tickets",
            Resource::CountyTickets => "county_tickets",
            Resource::RecentArticles => "recent_articles",
            Resource::CommunityActivity => "community_activity",
            Resource::UpdatesFeed => "updates_feed",
            Resource::PopularArticles => "popular_articles",
            Resource::DueThisWeek => "due_this_week",
            Resource::SystemStatus => "system_status",
        }
    }

    pub fn is_periodic(&self) -> bool {
        Resource::PERIODIC.contains(self)
    }
}

/// One-time interactive initializers run at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    Calendar,
    Tabs,
    Filters,
    Search,
}

impl Widget {
    pub const ALL: [Widget; 4] = [Widget::Calendar, Widget::Tabs, Widget::Filters, Widget::Search];

    pub fn name(&self) -> &'static str {
        match self {
            Widget::Calendar => "calendar",
            Widget::Tabs => "tabs",
            Widget::Filters => "filters",
            Widget::Search => "search",
        }
    }
}
