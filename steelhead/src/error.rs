//! Error types for steelhead.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for steelhead operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// CLI session errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Command output could not be turned into structured data
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid feature name or client configuration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A polled appliance condition never held
    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// The host is not present in known_hosts (strict verification)
    #[error("Host key for {host}:{port} is not known")]
    HostKeyUnknown { host: String, port: u16 },

    /// The host presented a different key than the one on record
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (prompt matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open PTY channel
    #[error("Failed to open PTY channel: {0}")]
    PtyOpenFailed(russh::Error),

    /// Failed to request shell
    #[error("Failed to request shell: {0}")]
    ShellRequestFailed(russh::Error),

    /// Writing to the channel failed
    #[error("Failed to write to channel: {0}")]
    WriteFailed(russh::Error),

    /// Prompt was not seen in time
    #[error("Prompt not found within {0:?}")]
    PatternTimeout(Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,
}

/// Errors reported by the appliance CLI session.
#[derive(Error, Debug)]
pub enum CliError {
    /// Session not open
    #[error("CLI session not open - call open() first")]
    NotConnected,

    /// Session already open
    #[error("CLI session already open")]
    AlreadyConnected,

    /// The appliance rejected the command
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Output presence did not match what the command should produce
    #[error("Unexpected output from '{command}': {output:?}")]
    UnexpectedOutput { command: String, output: String },
}

/// Errors raised when mandatory structure is absent from command output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An interface block did not start with an `Interface <name>` header
    #[error("No interface header found in block: {block:?}")]
    MissingInterfaceHeader { block: String },

    /// A date field did not match `YYYY/MM/DD HH:MM:SS`
    #[error("Invalid timestamp for '{field}': {value:?}")]
    InvalidTimestamp { field: String, value: String },

    /// A field that must always be reported was missing
    #[error("Missing required field '{field}'")]
    MissingField { field: String },
}

/// Client and dispatch configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Feature name not in the registry
    #[error("Unknown feature '{name}'")]
    UnknownFeature { name: String },

    /// No username supplied to the builder
    #[error("Username is required")]
    MissingUsername,

    /// An option value that the appliance CLI does not accept
    #[error("Invalid value {value:?} for {option}")]
    InvalidOption { option: &'static str, value: String },
}

/// A polled condition that did not become true in the allotted attempts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{description} (expected {expected}, got {actual})")]
pub struct VerificationError {
    pub description: String,
    pub expected: String,
    pub actual: String,
}

/// Result type alias using steelhead's Error.
pub type Result<T> = std::result::Result<T, Error>;
