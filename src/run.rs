//! One scan execution: walk every configured channel, classify posts and
//! replies against the keyword set, and append matched records.

use chanscan_core::{find_matches, ChannelError, ChannelRef, KeywordSet, ScanError};
use chrono::{DateTime, Utc};
use report_writer::ReportWriter;
use telegram_client::{ChannelApi, ChannelWalker};
use tracing::{info, warn};

#[derive(Debug)]
pub struct ChannelFailure {
    pub channel: ChannelRef,
    pub error: ChannelError,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub channels_scanned: usize,
    pub posts_seen: usize,
    pub posts_matched: usize,
    pub replies_matched: usize,
    pub failures: Vec<ChannelFailure>,
}

impl RunReport {
    pub fn completed_cleanly(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sequentially scans all channels. Channel failures are recorded and the
/// run continues; output failures abort immediately (records already
/// appended stay in place).
pub async fn run_scan<A: ChannelApi>(
    api: &A,
    channels: &[ChannelRef],
    keywords: &KeywordSet,
    lower_bound: DateTime<Utc>,
    posts_out: &mut ReportWriter,
    replies_out: &mut ReportWriter,
) -> Result<RunReport, ScanError> {
    let walker = ChannelWalker::new(api, lower_bound);
    let mut report = RunReport::default();

    for channel in channels {
        match scan_channel(&walker, channel, keywords, posts_out, replies_out, &mut report).await {
            Ok(()) => report.channels_scanned += 1,
            Err(ScanError::Channel(error)) => {
                warn!("Skipping channel {}: {}", channel, error);
                report.failures.push(ChannelFailure {
                    channel: channel.clone(),
                    error,
                });
            }
            Err(fatal) => return Err(fatal),
        }
    }

    info!(
        "Scan finished: {} posts matched, {} replies matched ({} posts across {} channels)",
        report.posts_matched, report.replies_matched, report.posts_seen, report.channels_scanned
    );
    Ok(report)
}

async fn scan_channel<A: ChannelApi>(
    walker: &ChannelWalker<'_, A>,
    channel: &ChannelRef,
    keywords: &KeywordSet,
    posts_out: &mut ReportWriter,
    replies_out: &mut ReportWriter,
    report: &mut RunReport,
) -> Result<(), ScanError> {
    let mut threads = walker.walk(channel).await.map_err(ScanError::Channel)?;

    while let Some(thread) = threads.next_thread().await.map_err(ScanError::Channel)? {
        report.posts_seen += 1;
        let channel_info = threads.channel();

        let matched = find_matches(&thread.post.text, keywords);
        if !matched.is_empty() {
            posts_out.append_post(channel_info, &thread.post, &matched)?;
            report.posts_matched += 1;
        }

        // Replies are classified on their own, whether or not the post matched.
        for reply in &thread.replies {
            let matched = find_matches(&reply.text, keywords);
            if !matched.is_empty() {
                replies_out.append_reply(channel_info, &thread.post, reply, &matched)?;
                report.replies_matched += 1;
            }
        }
    }

    Ok(())
}
