//! Typed views of the ERP records the HR screens work with.
//!
//! Field names follow the ERP so payloads can be passed through unchanged;
//! only reference pairs, `false` placeholders and timestamps are reshaped.

mod attendance;
mod dashboard;
mod department;
mod employee;
mod fields;
mod job;
mod payroll;

pub use attendance::*;
pub use dashboard::*;
pub use department::*;
pub use employee::*;
pub use fields::*;
pub use job::*;
pub use payroll::*;
