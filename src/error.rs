use thiserror::Error;

/// Errors produced by constant containers and the constants they hold.
///
/// Every variant describes a programming error in the calling code (or in a
/// declaration). None of them is retried or swallowed by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantsError {
    /// An attempt was made to create an instance of a container.
    ///
    /// Containers are closed sets of constants, not types with values of
    /// their own.
    #[error("{container} may not be instantiated.")]
    Instantiation {
        /// The declared name of the container.
        container: &'static str,
    },

    /// No constant with the given name is declared in the container.
    #[error("no constant named {name:?} in {container}")]
    NameNotFound {
        /// The declared name of the container.
        container: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// No constant with the given value is declared in the container.
    #[error("no constant with value {value} in {container}")]
    ValueNotFound {
        /// The declared name of the container.
        container: &'static str,
        /// The `Debug` rendering of the value that was looked up.
        value: String,
    },

    /// A constant that is already bound to a container was realized again.
    #[error("constant {name} of {container} has already been realized")]
    AlreadyRealized {
        /// The container the constant is already bound to.
        container: &'static str,
        /// The name the constant is already bound to.
        name: String,
    },

    /// A flag with no remaining bit to auto-assign was declared.
    #[error("no bits left to assign to flag {name} of {container}")]
    FlagBitsExhausted {
        /// The declared name of the container.
        container: &'static str,
        /// The name of the flag that could not be assigned a value.
        name: String,
    },

    /// An operation that needs a realized constant was given a placeholder.
    #[error("constant has not been realized")]
    Unrealized,

    /// Flags from two different containers were combined.
    #[error("cannot combine flags of {left} with flags of {right}")]
    ContainerMismatch {
        /// The container of the left operand.
        left: &'static str,
        /// The container of the right operand.
        right: &'static str,
    },
}

impl ConstantsError {
    /// Returns true for a lookup by name or by value that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConstantsError::NameNotFound { .. }
                | ConstantsError::ValueNotFound { .. }
        )
    }

    /// Returns the name of the container the error refers to, if any.
    ///
    /// For [`ConstantsError::ContainerMismatch`] this is the container of
    /// the left operand.
    pub fn container(&self) -> Option<&'static str> {
        match self {
            ConstantsError::Instantiation { container }
            | ConstantsError::NameNotFound { container, .. }
            | ConstantsError::ValueNotFound { container, .. }
            | ConstantsError::AlreadyRealized { container, .. }
            | ConstantsError::FlagBitsExhausted { container, .. } => {
                Some(*container)
            }
            ConstantsError::ContainerMismatch { left, .. } => Some(*left),
            ConstantsError::Unrealized => None,
        }
    }
}

/// A `Result` whose error type is [`ConstantsError`].
pub type Result<T> = std::result::Result<T, ConstantsError>;
