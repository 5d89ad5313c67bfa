use chanscan_core::{
    find_matches, highlight, lower_bound, ChannelError, ConfigError, KeywordSet, ScanError,
    WindowMode, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN,
};
use chrono::{TimeZone, Utc};

#[test]
fn test_match_then_highlight_scenario() {
    let keywords = KeywordSet::new(vec!["urgent", "sale"]);
    let text = "Urgent SALE today";

    let matched = find_matches(text, &keywords);
    assert_eq!(matched, vec!["urgent", "sale"]);

    let marked = highlight(text, &matched);
    assert_eq!(
        marked,
        format!(
            "{open}Urgent{close} {open}SALE{close} today",
            open = HIGHLIGHT_OPEN,
            close = HIGHLIGHT_CLOSE
        )
    );
}

#[test]
fn test_unmatched_message_is_left_alone() {
    let keywords = KeywordSet::new(vec!["urgent"]);
    let text = "quiet day in the channel";

    let matched = find_matches(text, &keywords);
    assert!(matched.is_empty());
    assert_eq!(highlight(text, &matched), text);
}

#[test]
fn test_window_modes_against_known_reference() {
    let reference = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();

    let today = lower_bound(WindowMode::Today, reference).unwrap();
    assert_eq!(today, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());

    let rolling = lower_bound(WindowMode::RecentHours(6), reference).unwrap();
    assert_eq!(rolling, Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap());
}

#[test]
fn test_fatality_classification() {
    let config: ScanError = ConfigError::InvalidHours { hours: -1 }.into();
    assert!(config.is_fatal());

    let channel: ScanError = ChannelError::Unreachable {
        channel: "@somewhere".to_string(),
        reason: "access denied".to_string(),
    }
    .into();
    assert!(!channel.is_fatal());
}

#[test]
fn test_channel_error_reports_its_channel() {
    let err = ChannelError::Transient {
        channel: "@news".to_string(),
        reason: "rate limited".to_string(),
        retry_after: Some(30),
    };
    assert!(err.is_transient());
    assert_eq!(err.channel(), "@news");
}
