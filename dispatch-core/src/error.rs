//! Error taxonomy for building and solving a routing request.

use thiserror::Error;

use crate::RecordId;

/// Structural or consistency failures in a request payload.
///
/// Every variant maps to an "invalid input" response at the request
/// boundary; none of them indicate a defect in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The payload could not be parsed into typed records.
    #[error("malformed payload: {0}")]
    Malformed(String),
    /// The time matrix has no rows.
    #[error("time matrix must contain at least one location")]
    EmptyMatrix,
    /// A matrix row does not have one column per location.
    #[error("time matrix row {row} has {len} columns but {expected} expected (matrix must be square)")]
    NonSquareMatrix {
        /// Offending row.
        row: usize,
        /// Number of columns found in that row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// A job references a location outside the matrix.
    #[error("job {job} has location index {index} but only {locations} locations exist")]
    LocationOutOfRange {
        /// Offending job.
        job: RecordId,
        /// Location index supplied.
        index: usize,
        /// Number of real locations.
        locations: usize,
    },
    /// A job carries no delivery quantity.
    #[error("job {job} has an empty delivery list")]
    MissingDelivery {
        /// Offending job.
        job: RecordId,
    },
    /// A vehicle starts outside the matrix.
    #[error("vehicle {vehicle} has start index {index} but only {locations} locations exist")]
    StartOutOfRange {
        /// Offending vehicle.
        vehicle: RecordId,
        /// Start index supplied.
        index: usize,
        /// Number of real locations.
        locations: usize,
    },
    /// A vehicle carries no capacity.
    #[error("vehicle {vehicle} has an empty capacity list")]
    MissingCapacity {
        /// Offending vehicle.
        vehicle: RecordId,
    },
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// Two vehicles share an identifier.
    #[error("vehicle id {vehicle} is used more than once")]
    DuplicateVehicleId {
        /// Repeated identifier.
        vehicle: RecordId,
    },
    /// Pooling quantities at one location overflowed.
    #[error("pooled {quantity} at location {location} overflows")]
    QuantityOverflow {
        /// Which pooled quantity overflowed.
        quantity: &'static str,
        /// Location being pooled.
        location: usize,
    },
    /// Pools were built for a different node count than the matrix.
    #[error("{part} covers {actual} nodes but the time matrix has {expected}")]
    SizeMismatch {
        /// Which part disagrees with the matrix.
        part: &'static str,
        /// Node count of that part.
        actual: usize,
        /// Node count of the augmented matrix.
        expected: usize,
    },
    /// The routing engine refused to build a model from the instance.
    #[error("routing model rejected: {0}")]
    EngineRejected(String),
}

/// Errors returned while solving a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The payload was malformed or inconsistent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The engine found no assignment satisfying the constraints.
    #[error("no feasible solution found")]
    NoSolution,
    /// Anything unclassified, e.g. a malformed engine assignment.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SolveError {
    /// Build an [`SolveError::Internal`] from any displayable cause.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn invalid_input_message_names_detail() {
        let err = SolveError::from(InvalidInputError::NonSquareMatrix {
            row: 1,
            len: 1,
            expected: 2,
        });
        assert_eq!(
            err.to_string(),
            "invalid input: time matrix row 1 has 1 columns but 2 expected (matrix must be square)"
        );
    }

    #[rstest]
    fn no_solution_message_is_distinct() {
        let invalid = SolveError::from(InvalidInputError::NoVehicles).to_string();
        let infeasible = SolveError::NoSolution.to_string();
        assert_ne!(invalid, infeasible);
        assert_eq!(infeasible, "no feasible solution found");
    }
}
