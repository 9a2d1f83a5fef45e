pub mod catalog;
pub mod explain;
pub mod ffi;
pub mod filter;
pub mod model;
pub mod plan;
pub mod steps;

pub use catalog::{
    decode_document, decode_response, load_or_empty, CatalogError, CatalogFormat, CatalogProvider,
    FailureKind, LocalCatalog, RemoteConfig, RemoteQuery,
};
#[cfg(feature = "remote")]
pub use catalog::RemoteCatalog;
pub use explain::{explain, NOTHING_AVAILABLE};
pub use filter::{filter, filter_with_report, matches, FilterReport, Stage};
pub use model::*;
pub use plan::{plan, plan_from, MealPlan};
pub use steps::{segment, Step};

uniffi::setup_scaffolding!();
