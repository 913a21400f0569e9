//! Validated fleet with start and end nodes.

use std::collections::HashSet;

use crate::{InvalidInputError, RecordId, VehicleRecord};

/// A validated vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    /// Caller-supplied identifier, unique within the fleet.
    pub id: RecordId,
    /// Node the vehicle starts from.
    pub start: usize,
    /// Node the vehicle ends at; always the terminal node.
    pub end: usize,
    /// Load capacity, the first entry of the record's capacity list.
    pub capacity: u64,
}

/// The fleet, in input order.
///
/// # Examples
/// ```
/// use dispatch_core::{RecordId, VehiclePool, VehicleRecord};
///
/// let records = vec![
///     VehicleRecord { id: RecordId::new("v1"), start_index: 0, capacity: vec![10] },
///     VehicleRecord { id: RecordId::new("v2"), start_index: 0, capacity: vec![4] },
/// ];
/// let pool = VehiclePool::build(&records, 3)?;
/// assert_eq!(pool.end_indices(), vec![2, 2]);
/// assert!(pool.owns_start(0));
/// assert!(!pool.owns_start(1));
/// # Ok::<(), dispatch_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehiclePool {
    vehicles: Vec<Vehicle>,
    owns_start: Vec<bool>,
    node_count: usize,
}

impl VehiclePool {
    /// Validate `records` against a matrix of `node_count` nodes.
    ///
    /// # Errors
    /// [`InvalidInputError::NoVehicles`] for an empty fleet,
    /// [`InvalidInputError::MissingCapacity`],
    /// [`InvalidInputError::StartOutOfRange`] and
    /// [`InvalidInputError::DuplicateVehicleId`] for the first offending
    /// record.
    pub fn build(records: &[VehicleRecord], node_count: usize) -> Result<Self, InvalidInputError> {
        if records.is_empty() {
            return Err(InvalidInputError::NoVehicles);
        }
        let terminal = node_count.saturating_sub(1);
        let mut seen_ids = HashSet::with_capacity(records.len());
        let mut seen_starts = HashSet::with_capacity(records.len());
        let mut vehicles = Vec::with_capacity(records.len());
        let mut owns_start = Vec::with_capacity(records.len());

        for record in records {
            let capacity = record.capacity.first().copied().ok_or_else(|| {
                InvalidInputError::MissingCapacity {
                    vehicle: record.id.clone(),
                }
            })?;
            if record.start_index >= terminal {
                return Err(InvalidInputError::StartOutOfRange {
                    vehicle: record.id.clone(),
                    index: record.start_index,
                    locations: terminal,
                });
            }
            if !seen_ids.insert(record.id.as_str()) {
                return Err(InvalidInputError::DuplicateVehicleId {
                    vehicle: record.id.clone(),
                });
            }
            owns_start.push(seen_starts.insert(record.start_index));
            vehicles.push(Vehicle {
                id: record.id.clone(),
                start: record.start_index,
                end: terminal,
                capacity,
            });
        }

        Ok(Self {
            vehicles,
            owns_start,
            node_count,
        })
    }

    /// Vehicles in input order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicle at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    /// Capacities in vehicle order.
    #[must_use]
    pub fn capacities(&self) -> Vec<u64> {
        self.vehicles.iter().map(|vehicle| vehicle.capacity).collect()
    }

    /// Start nodes in vehicle order.
    #[must_use]
    pub fn start_indices(&self) -> Vec<usize> {
        self.vehicles.iter().map(|vehicle| vehicle.start).collect()
    }

    /// End nodes in vehicle order; every entry is the terminal node.
    #[must_use]
    pub fn end_indices(&self) -> Vec<usize> {
        self.vehicles.iter().map(|vehicle| vehicle.end).collect()
    }

    /// Number of vehicles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Always `false`: an empty fleet is rejected by [`VehiclePool::build`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Number of nodes the pool was validated against.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether `vehicle` is the first vehicle starting at its start node.
    ///
    /// Jobs located at a start node are delivered by that vehicle only.
    #[must_use]
    pub fn owns_start(&self, vehicle: usize) -> bool {
        self.owns_start.get(vehicle).copied().unwrap_or(false)
    }

    /// Sum of all capacities, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .fold(0_u64, |total, vehicle| total.saturating_add(vehicle.capacity))
    }
}
