use thiserror::Error;

/// Every refused operation leaves table state untouched; callers may retry
/// after checking the legality predicates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid bet: {0}")]
    InvalidBet(&'static str),

    #[error("illegal action: {0}")]
    IllegalAction(&'static str),

    /// Guarded against by the pre-deal refill; not reachable through the
    /// public API when the refill floor holds.
    #[error("shoe is empty")]
    ShoeEmpty,

    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}
