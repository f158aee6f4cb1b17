mod category;
mod error;
mod hdf;
mod parse;
mod schema;

pub use category::CategoryPath;
pub use error::{ReportError, Result};
pub use hdf::{finding_details, resolve_status, ControlStatus, Severity};
pub use parse::{recognize, Document};
pub use schema::{
    ControlDef, ControlResult, ControlTags, Dependency, ExecReport, Platform, ProfileDef,
    ProfileReport, Statistics,
};
