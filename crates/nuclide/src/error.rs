//! Result and Error types for nuclide parsing

/// Type alias for `Result<T, nuclide::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `naa-nuclide`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Text that matches neither the `Symbol-A[meta]` nor `A[m]Symbol` forms
    #[error("unrecognised nuclide \"{text}\"")]
    Unrecognised {
        /// The offending input, trimmed
        text: String,
    },
}
