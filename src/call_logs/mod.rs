//! Call-log endpoints
//!
//! Typed queries and records for the per-user and account-wide call-log
//! endpoints, plus [`CallLogsClient`] which runs them through the
//! paginated executor.

mod client;
mod types;

pub use client::CallLogsClient;
pub use types::{
    user_call_logs_path, AccountCallLog, AccountCallLogQuery, CallLogOwner, CallType, PathType,
    Site, TimeType, UserCallLog, UserCallLogQuery, ACCOUNT_CALL_LOGS_PATH, CALL_LOGS_FIELD,
};
