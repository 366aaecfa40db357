//! Constants used throughout the prospectus engine

// =============================================================================
// Planning horizon
// =============================================================================

/// Number of months covered by the plan
pub const HORIZON_MONTHS: usize = 24;

/// Width of one cost bucket in months
pub const BUCKET_MONTHS: usize = 4;

/// Fixed cost buckets as inclusive (start, end) month pairs
pub const BUCKETS: [(u32, u32); 6] = [(1, 4), (5, 8), (9, 12), (13, 16), (17, 20), (21, 24)];

// =============================================================================
// Xano endpoints
// =============================================================================

/// Default Xano API group when neither a base URL nor explicit URLs are configured
pub const DEFAULT_XANO_BASE: &str = "http://localhost:8080/api:glowskill";

/// Revenue streams path (relative to the base URL)
pub const REVENUE_PATH: &str = "revenue/streams";

/// KPI summary path (relative to the base URL)
pub const KPI_PATH: &str = "kpi/summary";

/// Cost configuration path (relative to the base URL)
pub const COST_PATH: &str = "gskiiicost";

// =============================================================================
// User-facing advisories
// =============================================================================

pub const REVENUE_FALLBACK_MESSAGE: &str = "Unable to load data from Xano. Showing demo data.";
pub const COST_ERROR_MESSAGE: &str = "Unable to load cost configuration from Xano.";

// =============================================================================
// Output
// =============================================================================

/// Prefix of exported dashboard documents; the scenario name is appended
pub const EXPORT_FILE_PREFIX: &str = "glowskill-prospectus";

/// Colors handed out to cost series that arrive without one
pub const COST_PALETTE: [&str; 8] = [
    "#6366F1", "#22C55E", "#F97316", "#14B8A6", "#EF4444", "#A855F7", "#EAB308", "#0EA5E9",
];
