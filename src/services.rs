pub mod chart_service;
pub mod document_service;
pub mod month_labels;
pub mod report_service;
pub mod summary_service;

pub use chart_service::ChartService;
pub use document_service::DocumentService;
pub use report_service::{ReportOutcome, ReportRequest, ReportService};
