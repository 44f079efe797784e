// onet-etl-core/src/application/mod.rs

pub mod engine;
pub mod extract;
pub mod insights;
pub mod materialization;
pub mod report;
pub mod transform;
pub mod validation;

// --- RE-EXPORTS (FACADE) ---
// Le CLI fait `use onet_etl_core::application::{run_transform, run_checks};`
// sans connaître la structure interne des fichiers.

pub use engine::execute_query;
pub use extract::{ExtractReport, execute_sql_scripts, resolve_scripts};
pub use insights::{InsightsReport, run_insights};
pub use materialization::Materializer;
pub use transform::{TableOutcome, TransformOptions, TransformReport, run_transform};
pub use validation::{CheckStatus, ValidationReport, run_checks};
