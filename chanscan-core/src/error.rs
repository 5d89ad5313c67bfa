use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Fatal errors abort the run; channel errors are recorded and skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScanError::Channel(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid hours value: {hours} (must be positive)")]
    InvalidHours { hours: i64 },

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Keyword list {path} contains no usable keywords")]
    NoKeywords { path: String },

    #[error("Channel list {path} contains no channels")]
    NoChannels { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Channel {channel} unreachable: {reason}")]
    Unreachable { channel: String, reason: String },

    #[error("Transient fetch failure for {channel}: {reason}")]
    Transient {
        channel: String,
        reason: String,
        retry_after: Option<u64>,
    },

    #[error("Invalid gateway response for {channel}: {details}")]
    InvalidResponse { channel: String, details: String },
}

impl ChannelError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ChannelError::Transient { .. })
    }

    /// The channel reference the failure belongs to, for the run summary.
    pub fn channel(&self) -> &str {
        match self {
            ChannelError::Unreachable { channel, .. }
            | ChannelError::Transient { channel, .. }
            | ChannelError::InvalidResponse { channel, .. } => channel,
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Cannot open {path} for appending: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write to {path} failed: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
