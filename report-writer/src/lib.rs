//! Append-only Markdown report output.
//!
//! Each matched post or reply becomes one self-contained record, flushed as
//! soon as it is written. Prior content is never read back or rewritten, so
//! an interrupted run keeps everything appended before the interruption.

use chanscan_core::{highlight, ChannelInfo, Message, OutputError};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ReportWriter {
    file: File,
    path: PathBuf,
}

impl ReportWriter {
    /// Opens (creating if needed) the destination for appending. Failure is
    /// `OutputError::Unavailable`, which is fatal for the run.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| OutputError::Unavailable {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one post record with the matched keywords highlighted.
    pub fn append_post(
        &mut self,
        channel: &ChannelInfo,
        post: &Message,
        matched: &[&str],
    ) -> Result<(), OutputError> {
        let body = highlight(&post.text, matched);
        let record = format_record(
            channel,
            "Date",
            "Post",
            "Post Link",
            post.created_at,
            &post.author,
            &body,
            channel.post_link(post.id),
        );
        self.write_record(&record)
    }

    /// Appends one reply record. The permalink points at the reply within
    /// its parent post's comment view.
    pub fn append_reply(
        &mut self,
        channel: &ChannelInfo,
        post: &Message,
        reply: &Message,
        matched: &[&str],
    ) -> Result<(), OutputError> {
        let body = highlight(&reply.text, matched);
        let record = format_record(
            channel,
            "Comment Date",
            "Comment",
            "Comment Link",
            reply.created_at,
            &reply.author,
            &body,
            channel.reply_link(post.id, reply.id),
        );
        self.write_record(&record)
    }

    fn write_record(&mut self, record: &str) -> Result<(), OutputError> {
        debug!("Appending record to {}", self.path.display());
        self.file
            .write_all(record.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| OutputError::Write {
                path: self.path.display().to_string(),
                source,
            })
    }
}

fn format_record(
    channel: &ChannelInfo,
    date_label: &str,
    body_label: &str,
    link_label: &str,
    created_at: DateTime<Utc>,
    author: &str,
    body: &str,
    link: Option<String>,
) -> String {
    let link_line = match link {
        Some(url) => format!("[{link_label}]({url})"),
        None => "No public link".to_string(),
    };
    format!(
        "### Group: {}\n**{}:** {} (UTC)\n**Author:** {}\n\n**{}:**\n\n{}\n\n{}\n\n---\n\n",
        channel.display_name(),
        date_label,
        created_at.format("%Y-%m-%d %H:%M:%S"),
        author,
        body_label,
        body,
        link_line,
    )
}
