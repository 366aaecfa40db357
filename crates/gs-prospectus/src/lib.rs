//! Revenue projection and cost aggregation for the Glowskill prospectus.
//!
//! Data comes from a Xano backend; when revenue is unavailable the built-in
//! demo curve is used instead, scaled for the selected scenario.

pub mod config;
pub mod constants;
pub mod costs;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod format;
pub mod html_report;
pub mod mapper;
pub mod numeric;
pub mod reports;
pub mod scenario;
pub mod types;
pub mod xano;

pub use config::{EndpointConfig, Endpoints};
pub use dashboard::{DashboardSnapshot, load_dashboard};
pub use error::FetchError;
pub use types::{ChartRow, CostConfig, CostMode, CostSeries, RevenuePoint, Scenario};
pub use xano::{RevenueResult, XanoClient};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber; `RUST_LOG` overrides the defaults.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gs_prospectus=info,gs_web=info"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}
