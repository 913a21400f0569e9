//! Per-node pooling of delivery jobs.
//!
//! Several jobs may share a location. The engine only sees nodes, so demand
//! and service time are summed per location, while the reverse map keeps the
//! job identities needed to decode a route back into job lists.

use crate::{InvalidInputError, JobRecord, RecordId};

/// A validated delivery job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Caller-supplied identifier.
    pub id: RecordId,
    /// Location index the job is delivered to.
    pub location: usize,
    /// Delivered quantity, the first entry of the record's delivery list.
    pub demand: u64,
    /// Service time spent at the location.
    pub service_time: u64,
}

/// Jobs pooled by node.
///
/// All vectors have one entry per node of the augmented matrix; the entry of
/// the terminal node is always zero and its job list empty.
///
/// # Examples
/// ```
/// use dispatch_core::{JobPool, JobRecord, RecordId};
///
/// let records = vec![
///     JobRecord { id: RecordId::new("a"), location_index: 1, delivery: vec![2], service: 5 },
///     JobRecord { id: RecordId::new("b"), location_index: 1, delivery: vec![3], service: 1 },
/// ];
/// let pool = JobPool::build(&records, 3)?;
/// assert_eq!(pool.demand_at(1), 5);
/// assert_eq!(pool.service_time_at(1), 6);
/// assert_eq!(pool.jobs_at(1), [RecordId::new("a"), RecordId::new("b")]);
/// assert!(pool.jobs_at(2).is_empty());
/// # Ok::<(), dispatch_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPool {
    jobs: Vec<Job>,
    demand: Vec<u64>,
    service_time: Vec<u64>,
    by_node: Vec<Vec<RecordId>>,
}

impl JobPool {
    /// Pool `records` over `node_count` nodes (real locations plus terminal).
    ///
    /// # Errors
    /// [`InvalidInputError::MissingDelivery`] for a job without a delivery
    /// quantity, [`InvalidInputError::LocationOutOfRange`] for a job outside
    /// the real locations and [`InvalidInputError::QuantityOverflow`] when a
    /// pooled sum does not fit in `u64`.
    pub fn build(records: &[JobRecord], node_count: usize) -> Result<Self, InvalidInputError> {
        let locations = node_count.saturating_sub(1);
        let mut pool = Self {
            jobs: Vec::with_capacity(records.len()),
            demand: vec![0; node_count],
            service_time: vec![0; node_count],
            by_node: vec![Vec::new(); node_count],
        };

        for record in records {
            let job = validate(record, locations)?;
            pool.add(job)?;
        }
        Ok(pool)
    }

    fn add(&mut self, job: Job) -> Result<(), InvalidInputError> {
        let location = job.location;
        let overflow = |quantity| InvalidInputError::QuantityOverflow { quantity, location };

        let demand = self
            .demand
            .get_mut(location)
            .ok_or_else(|| overflow("demand"))?;
        *demand = demand
            .checked_add(job.demand)
            .ok_or_else(|| overflow("demand"))?;

        let service = self
            .service_time
            .get_mut(location)
            .ok_or_else(|| overflow("service time"))?;
        *service = service
            .checked_add(job.service_time)
            .ok_or_else(|| overflow("service time"))?;

        if let Some(ids) = self.by_node.get_mut(location) {
            ids.push(job.id.clone());
        }
        self.jobs.push(job);
        Ok(())
    }

    /// Pooled demand at `node`, zero for unknown nodes.
    #[must_use]
    pub fn demand_at(&self, node: usize) -> u64 {
        self.demand.get(node).copied().unwrap_or(0)
    }

    /// Pooled service time at `node`, zero for unknown nodes.
    #[must_use]
    pub fn service_time_at(&self, node: usize) -> u64 {
        self.service_time.get(node).copied().unwrap_or(0)
    }

    /// Job ids delivered at `node`, in input order.
    #[must_use]
    pub fn jobs_at(&self, node: usize) -> &[RecordId] {
        self.by_node.get(node).map_or(&[], Vec::as_slice)
    }

    /// Validated jobs in input order.
    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of jobs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the pool holds no jobs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of nodes the pool was built for.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.demand.len()
    }

    /// Sum of all demand, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.demand
            .iter()
            .fold(0_u64, |total, demand| total.saturating_add(*demand))
    }
}

fn validate(record: &JobRecord, locations: usize) -> Result<Job, InvalidInputError> {
    let demand = record
        .delivery
        .first()
        .copied()
        .ok_or_else(|| InvalidInputError::MissingDelivery {
            job: record.id.clone(),
        })?;
    if record.location_index >= locations {
        return Err(InvalidInputError::LocationOutOfRange {
            job: record.id.clone(),
            index: record.location_index,
            locations,
        });
    }
    Ok(Job {
        id: record.id.clone(),
        location: record.location_index,
        demand,
        service_time: record.service,
    })
}
