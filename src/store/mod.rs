//! Visitor store: records, in-memory persistence, and demo seeding
//!
//! The store exclusively owns [`VisitorRecord`] and [`EmployeeRecord`];
//! all mutation passes through the registration workflow or the status
//! transition engine.

pub mod records;
pub mod seed;
pub mod visitor_store;

pub use records::{EmployeeRecord, EmployeeUpdate, NewEmployee, VisitorDetails, VisitorRecord};
pub use seed::seed_demo_data;
pub use visitor_store::VisitorStore;
