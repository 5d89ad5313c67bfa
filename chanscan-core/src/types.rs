use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// A configured channel to scan: either a public handle or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Handle(String),
    Id(i64),
}

impl ChannelRef {
    /// Every non-empty line is a valid reference: numeric ids parse as
    /// `Id`, everything else is a handle (leading `@` optional).
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return ChannelRef::Id(id);
        }
        ChannelRef::Handle(trimmed.trim_start_matches('@').to_string())
    }
}

impl FromStr for ChannelRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChannelRef::parse(s))
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Handle(handle) => write!(f, "@{}", handle),
            ChannelRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Resolved channel identity as the gateway reports it. The public handle,
/// when present, drives permalink construction.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub id: i64,
    pub title: String,
    pub handle: Option<String>,
}

impl ChannelInfo {
    pub fn post_link(&self, message_id: i64) -> Option<String> {
        self.handle
            .as_ref()
            .map(|handle| format!("https://t.me/{}/{}", handle, message_id))
    }

    pub fn reply_link(&self, post_id: i64, reply_id: i64) -> Option<String> {
        self.handle
            .as_ref()
            .map(|handle| format!("https://t.me/{}/{}?comment={}", handle, post_id, reply_id))
    }

    /// Name shown in report headings: the handle if public, the title otherwise.
    pub fn display_name(&self) -> String {
        match &self.handle {
            Some(handle) => format!("@{}", handle),
            None => self.title.clone(),
        }
    }
}

/// One post or reply fetched from a channel. Read-only for the run.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub parent_id: Option<i64>,
}

impl Message {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A top-level post paired with all of its direct replies.
#[derive(Debug, Clone)]
pub struct Thread {
    pub post: Message,
    pub replies: Vec<Message>,
}

/// Ordered keyword list. `new` enforces the invariant that no entry is empty
/// or whitespace-only; order is preserved for deterministic match reporting.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    entries: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry| !entry.trim().is_empty())
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
