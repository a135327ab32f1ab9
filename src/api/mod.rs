//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for net pay, employer cost,
//! STI evaluation and country comparison, plus read-only views of the
//! configured tables, metadata and reload.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ComparisonRequest, EmployerCostComparisonRequest, EmployerCostRequest, NetPayRequest,
    StiRequest,
};
pub use response::{
    ApiError, ComparisonResponse, CountriesResponse, EmployerCostComparisonResponse,
    EmployerCostResponse, NetPayResponse, ReloadResponse, StiAreaBands, StiBand,
    StiRangesResponse, StiResponse, TableFailure, TablesResponse,
};
pub use state::AppState;
