use thiserror::Error;

/// Errors raised while building or minimizing a Boolean function.
///
/// Most variants report invalid input and are returned before any computation starts.
/// The [Internal](QmkitError::Internal) variant reports a broken invariant of the
/// minimization engine itself: it does not depend on user input and should never be observed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QmkitError {
    /// The number of variables is outside of the supported range
    #[error("Unsupported number of variables: {0} (expected between 2 and 6)")]
    VariableCount(usize),

    /// The name is invalid
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The name Conflicts
    #[error("The name '{0}' conflicts with an other variable")]
    ConflictingName(String),

    /// The name is not part of the set of variables
    #[error("There is no variable named '{0}'")]
    NoSuchVariableName(String),

    /// An assignment index does not fit in the truth table
    #[error("The index {index} is outside of the truth table (size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    /// An index is both required and a don't-care
    #[error("The index {0} is both required and a don't-care")]
    OverlappingIndex(usize),

    /// An output vector does not match the size of the truth table
    #[error("Expected {expected} outputs, found {found}")]
    OutputLength { expected: usize, found: usize },

    /// A truth table output symbol could not be parsed
    #[error("'{0}' is not a valid output value")]
    InvalidOutput(char),

    /// A cube description could not be parsed
    #[error("Not a valid pattern: '{0}'")]
    InvalidPattern(String),

    /// The expression is invalid
    #[error("Not a valid expression: {0}")]
    InvalidExpression(String),

    /// The minimization engine broke one of its own invariants
    #[error("Internal consistency error: {0}")]
    Internal(#[from] InternalError),
}

/// Broken invariants of the minimization engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A required minterm is not covered by any prime implicant
    #[error("no prime implicant covers the minterm {0}")]
    UncoveredMinterm(usize),

    /// The merge passes did not reach a fixed point
    #[error("prime implicant generation did not terminate after {passes} passes")]
    MergeDidNotTerminate { passes: usize },

    /// Two merges produced the same cube with different covers
    #[error("the cube '{0}' was produced with inconsistent covers")]
    InconsistentCover(String),
}

impl QmkitError {
    /// Test if this error reports a defect of the engine rather than an invalid input
    pub fn is_internal(&self) -> bool {
        matches!(self, QmkitError::Internal(_))
    }
}
