mod error;
mod ingest;
mod response;
mod router;
mod vehicles;

pub use error::ApiError;
pub use response::ApiResponse;
pub use router::{build_router, AppState};
