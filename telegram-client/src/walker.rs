use crate::api::{ChannelApi, DEFAULT_PAGE_SIZE};
use chanscan_core::{ChannelError, ChannelInfo, ChannelRef, Message, Thread};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Walks channels thread by thread, newest first, stopping at the window's
/// lower bound. Holds only the current page in memory.
pub struct ChannelWalker<'a, A: ChannelApi> {
    api: &'a A,
    lower_bound: DateTime<Utc>,
}

impl<'a, A: ChannelApi> ChannelWalker<'a, A> {
    pub fn new(api: &'a A, lower_bound: DateTime<Utc>) -> Self {
        Self { api, lower_bound }
    }

    /// Resolves the channel and returns a lazy iterator over its in-window
    /// threads. Resolution failure is `ChannelError::Unreachable`.
    pub async fn walk(&self, channel: &ChannelRef) -> Result<ThreadIter<'a, A>, ChannelError> {
        let info = self.api.resolve_channel(channel).await?;
        info!("Processing channel: {}", channel);
        Ok(ThreadIter {
            api: self.api,
            channel: info,
            lower_bound: self.lower_bound,
            before_id: None,
            page: VecDeque::new(),
            exhausted: false,
        })
    }
}

/// Lazy, forward-only sequence of threads. Each call to `next_thread` pulls
/// gateway pages as needed; nothing beyond the current page is buffered.
pub struct ThreadIter<'a, A: ChannelApi> {
    api: &'a A,
    channel: ChannelInfo,
    lower_bound: DateTime<Utc>,
    before_id: Option<i64>,
    page: VecDeque<Message>,
    exhausted: bool,
}

impl<'a, A: ChannelApi> ThreadIter<'a, A> {
    pub fn channel(&self) -> &ChannelInfo {
        &self.channel
    }

    /// The next in-window top-level post with all of its direct replies, or
    /// `None` once the channel history reaches the window's lower bound.
    pub async fn next_thread(&mut self) -> Result<Option<Thread>, ChannelError> {
        loop {
            let Some(msg) = self.next_message().await? else {
                return Ok(None);
            };

            // Pages arrive newest first, so the first message older than
            // the bound ends the walk for this channel.
            if msg.created_at < self.lower_bound {
                debug!(
                    "Reached window lower bound in {} at message {}",
                    self.channel.display_name(),
                    msg.id
                );
                self.exhausted = true;
                self.page.clear();
                return Ok(None);
            }

            // Replies show up in the channel stream too; they are collected
            // through their parent post instead.
            if !msg.is_top_level() {
                continue;
            }

            let replies = self.fetch_replies(msg.id).await?;
            return Ok(Some(Thread { post: msg, replies }));
        }
    }

    async fn next_message(&mut self) -> Result<Option<Message>, ChannelError> {
        if let Some(msg) = self.page.pop_front() {
            return Ok(Some(msg));
        }
        if self.exhausted {
            return Ok(None);
        }

        let batch = self
            .api
            .channel_messages(&self.channel, self.before_id, DEFAULT_PAGE_SIZE)
            .await?;
        if batch.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }
        self.before_id = batch.last().map(|msg| msg.id);
        self.page = batch.into();
        Ok(self.page.pop_front())
    }

    /// Drains reply pagination for one post. Pages may be shorter than the
    /// requested limit, so only an empty page ends the loop, exactly like
    /// the channel page stream. Replies are not filtered by the time window.
    async fn fetch_replies(&self, parent_id: i64) -> Result<Vec<Message>, ChannelError> {
        let mut replies = Vec::new();
        let mut before_id = None;
        loop {
            let batch = self
                .api
                .message_replies(&self.channel, parent_id, before_id, DEFAULT_PAGE_SIZE)
                .await?;
            if batch.is_empty() {
                break;
            }
            before_id = batch.last().map(|msg| msg.id);
            replies.extend(batch);
        }
        Ok(replies)
    }
}
