pub mod analyze;
pub mod export;
pub mod fetch;
pub mod link;
pub mod model;
pub mod pool;
pub mod service;
pub mod transport;

pub use analyze::analyze;
pub use export::{export, export_at, write_export, ExportDocument, ExportInfo, ExportRecord};
pub use fetch::{FetchOutcome, GachaFetcher};
pub use link::extract_base_url;
pub use model::{FiveStarRecord, GachaLogEntry, PoolStatistic};
pub use pool::{default_pool_ids, pool_name, KNOWN_POOLS};
pub use service::{GachaReport, GachaService};
pub use transport::{GachaTransport, HttpTransport};
