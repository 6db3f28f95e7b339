pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod size;

pub use backend::{
    BackendRegistry, CleaningBackend, DirectoryBackend, PathStream, SpecialResult, SpecialStream,
};
pub use config::{CleanerConfig, CleanerDef, OptionDef};
pub use driver::{
    Accounting, Host, OperationRunner, PathResult, RunState, Step, Tag, Tick, Worker,
    WorkerConfig, clean_path,
};
pub use error::{BackendError, PathError, Result, ScourError};
pub use size::{format_count, format_size, progress_fraction};
