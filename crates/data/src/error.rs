//! Result and Error types for the data store

/// Type alias for `Result<T, data::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `naa-data`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failed to read a CSV table
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// No usable rows in the activation table
    ///
    /// The store is built around activation reactions, so an empty or fully
    /// malformed table leaves nothing to solve against.
    #[error("activation table contains no usable records")]
    EmptyActivationTable,

    /// Reaction channel text that matches no known channel
    #[error("unknown reaction channel \"{hint}\"")]
    UnknownReaction {
        /// The offending input
        hint: String,
    },
}
