pub mod config;
pub mod error;
pub mod gacha;
pub mod logging;
pub mod settings;

pub use config::{CoreConfig, ExportConfig, FetchConfig, SettingsConfig};
pub use error::{CoreError, CoreResult};
pub use gacha::{
    analyze, export, extract_base_url, write_export, ExportDocument, FetchOutcome, GachaFetcher,
    GachaLogEntry, GachaReport, GachaService, GachaTransport, HttpTransport, PoolStatistic,
};
pub use settings::SettingsStore;
