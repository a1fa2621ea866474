use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    init_logging_with("info");
}

/// `RUST_LOG` 优先，其次使用传入的默认级别
pub fn init_logging_with(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
