use chanscan_core::WindowMode;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "chanscan", about = "Scan group channels for keyword mentions")]
pub struct Args {
    /// Scan the last N hours instead of today (must be positive)
    #[arg(long, env = "CHANSCAN_HOURS")]
    pub hours: Option<i64>,

    /// Keyword list, one keyword per line
    #[arg(long, env = "CHANSCAN_KEYWORDS", default_value = "keywords.txt")]
    pub keywords: String,

    /// Channel list, one handle or numeric id per line
    #[arg(long, env = "CHANSCAN_CHANNELS", default_value = "channels.txt")]
    pub channels: String,

    /// Gateway connection settings
    #[arg(long, env = "CHANSCAN_CONFIG", default_value = "config.toml")]
    pub config: String,

    /// Report destination for matched posts
    #[arg(long, env = "CHANSCAN_POSTS_OUT", default_value = "saved_posts.md")]
    pub posts_out: String,

    /// Report destination for matched replies
    #[arg(long, env = "CHANSCAN_COMMENTS_OUT", default_value = "saved_comments.md")]
    pub comments_out: String,
}

impl Args {
    pub fn window_mode(&self) -> WindowMode {
        match self.hours {
            Some(hours) => WindowMode::RecentHours(hours),
            None => WindowMode::Today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["chanscan"]);
        assert_eq!(args.window_mode(), WindowMode::Today);
        assert_eq!(args.posts_out, "saved_posts.md");
        assert_eq!(args.comments_out, "saved_comments.md");
        assert_eq!(args.keywords, "keywords.txt");
    }

    #[test]
    fn test_hours_selects_rolling_window() {
        let args = Args::parse_from(["chanscan", "--hours", "6"]);
        assert_eq!(args.window_mode(), WindowMode::RecentHours(6));
    }

    #[test]
    fn test_path_overrides() {
        let args = Args::parse_from([
            "chanscan",
            "--keywords",
            "kw.txt",
            "--posts-out",
            "out/posts.md",
        ]);
        assert_eq!(args.keywords, "kw.txt");
        assert_eq!(args.posts_out, "out/posts.md");
    }
}
