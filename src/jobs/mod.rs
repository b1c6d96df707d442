//! Deferred job core: the job entity and its state machine, the shared
//! store, the execution engine and the background scheduler loop.

pub mod error;
pub mod types;
pub mod models;
pub mod store;
pub mod executor;
pub mod scheduler;

pub use error::{JobError, JobResult};
pub use types::JobStatus;
pub use models::{Job, NewJob};
pub use store::JobStore;
pub use executor::JobExecutor;
pub use scheduler::JobScheduler;
