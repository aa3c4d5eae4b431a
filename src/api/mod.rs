//! HTTP API module for the Salary Engine.
//!
//! A thin JSON adapter over the calculation functions: gross-to-net,
//! net-to-gross, frequency conversion and the compensation event wrappers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BonusRequest, CommissionRequest, ContractorRequest, ConvertFrequencyRequest,
    GrossToNetRequest, NetToGrossRequest, OvertimeRequest,
};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
