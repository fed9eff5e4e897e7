//! # Agora Shared
//!
//! Wire shapes of the board's documented REST contract: the result-code
//! envelope, snake_case DTOs and the endpoint catalog. Nothing here talks to a
//! network; these types only describe what a backend would exchange.

pub mod api_doc;
pub mod dto;
pub mod response;

pub use api_doc::{ApiInfo, Endpoint, HttpMethod};
pub use response::{ApiResponse, ResultCode};
