use thiserror::Error;

/// The submitted secret phrase matched neither configured identity.
///
/// Deliberately carries no detail about which comparison failed; the
/// caller simply re-prompts. There is no lockout or attempt counting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Incorrect secret phrase")]
pub struct AuthError;

/// Invalid two-identity configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PairError {
    /// Both identities were configured with the same name.
    #[error("Identity names must differ")]
    DuplicateName,

    /// Both identities were configured with the same secret phrase, which
    /// would make authentication ambiguous. Rejected at startup rather
    /// than resolved by match order.
    #[error("Identity secrets must differ")]
    DuplicateSecret,

    /// An identity name or secret was empty.
    #[error("Identity names and secrets must be non-empty")]
    Empty,
}
