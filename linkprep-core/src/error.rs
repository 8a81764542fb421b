//! Error types for the dataset orchestration layer.
//!
//! Defines the top-level error enum exposed by the public API and a
//! convenient result alias. Component-level errors (graph construction,
//! splitting, sampling) are wrapped rather than flattened so callers can
//! still reach the originating code.

use std::fmt;

use thiserror::Error;

use crate::{graph::GraphError, sample::SamplerError, split::SplitError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($brace:tt)* } )? $( ( $($paren:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($brace)* } )? $( ( $($paren)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running a
/// [`crate::LinkPredictionDataset`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DatasetError {
    /// The test-edge fraction must lie strictly between zero and one.
    #[error("test_edge_fraction must lie in (0, 1) (got {got})")]
    InvalidTestEdgeFraction {
        /// The invalid fraction supplied by the caller.
        got: f64,
    },
    /// At least one negative must be drawn per positive.
    #[error("negatives_per_positive must be at least 1")]
    InvalidNegativesPerPositive,
    /// The random-walk length must be at least one step.
    #[error("walk_length must be at least 1 (got {got})")]
    InvalidWalkLength {
        /// The invalid walk length supplied by the caller.
        got: usize,
    },
    /// A transform call arrived before `fit`.
    #[error("dataset has not been fitted; call fit() first")]
    NotFitted,
    /// The train/test split failed.
    #[error("edge split failed: {0}")]
    Split(#[from] SplitError),
    /// Negative-edge sampling failed.
    #[error("negative sampling failed: {0}")]
    Sampler(#[from] SamplerError),
    /// Graph construction failed.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// The test-edge fraction must lie strictly between zero and one.
        InvalidTestEdgeFraction => InvalidTestEdgeFraction { .. } => "DATASET_INVALID_TEST_EDGE_FRACTION",
        /// At least one negative must be drawn per positive.
        InvalidNegativesPerPositive => InvalidNegativesPerPositive => "DATASET_INVALID_NEGATIVES_PER_POSITIVE",
        /// The random-walk length must be at least one step.
        InvalidWalkLength => InvalidWalkLength { .. } => "DATASET_INVALID_WALK_LENGTH",
        /// A transform call arrived before `fit`.
        NotFitted => NotFitted => "DATASET_NOT_FITTED",
        /// The train/test split failed.
        SplitFailure => Split(..) => "DATASET_SPLIT_FAILURE",
        /// Negative-edge sampling failed.
        SamplerFailure => Sampler(..) => "DATASET_SAMPLER_FAILURE",
        /// Graph construction failed.
        GraphFailure => Graph(..) => "DATASET_GRAPH_FAILURE",
    }
}

impl DatasetError {
    /// Retrieve the inner [`crate::SplitErrorCode`] when the error originated
    /// in the splitter.
    pub const fn split_code(&self) -> Option<crate::split::SplitErrorCode> {
        match self {
            Self::Split(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`crate::SamplerErrorCode`] when the error
    /// originated in the sampler.
    pub const fn sampler_code(&self) -> Option<crate::sample::SamplerErrorCode> {
        match self {
            Self::Sampler(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the dataset API.
pub type Result<T> = core::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::{DatasetError, DatasetErrorCode};
    use crate::{sample::SamplerError, split::SplitError};

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            DatasetError::NotFitted.code().as_str(),
            "DATASET_NOT_FITTED"
        );
        assert_eq!(
            DatasetError::InvalidTestEdgeFraction { got: 1.5 }.code(),
            DatasetErrorCode::InvalidTestEdgeFraction
        );
        assert_eq!(
            DatasetError::from(SplitError::EmptyGraph).code().as_str(),
            "DATASET_SPLIT_FAILURE"
        );
    }

    #[test]
    fn wrapped_codes_stay_reachable() {
        let error = DatasetError::from(SamplerError::NotFitted);
        assert_eq!(
            error.sampler_code().map(|code| code.as_str()),
            Some("SAMPLER_NOT_FITTED")
        );
        assert_eq!(error.split_code(), None);

        let error = DatasetError::from(SplitError::EmptyGraph);
        assert_eq!(
            error.split_code().map(|code| code.as_str()),
            Some("SPLIT_EMPTY_GRAPH")
        );
    }
}
