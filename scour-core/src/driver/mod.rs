mod accounting;
mod host;
mod operation;
mod path;
mod worker;

pub use accounting::{Accounting, RunState, TotalSizeCallback};
pub use host::{Host, Tag};
pub use operation::{OperationRunner, Step};
pub use path::{PathResult, clean_path};
pub use worker::{Tick, Worker, WorkerConfig};
