mod compare;
mod context;
mod counts;
mod error;
mod file;
mod filter;
mod intake;
mod registry;
mod selection;

pub use compare::ComparisonContext;
pub use context::{
    contextualize_evaluation, contextualize_profile, ContextualizedControl,
    ContextualizedEvaluation, ContextualizedProfile, ControlLink,
};
pub use counts::StatusCounts;
pub use error::{Result, StoreError};
pub use file::{FileId, FileMeta, Payload, SourceFile};
pub use filter::{ControlSet, Filter, FilterEngine, MAX_CACHE_ENTRIES};
pub use intake::{load_file, load_text, TextLoadOptions};
pub use registry::DataStore;
pub use selection::{Selection, Trinary};
