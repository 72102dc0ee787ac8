//! HTTP protocol layer module
//!
//! Response builders and the CORS policy, decoupled from routing.

pub mod cors;
pub mod response;

// Re-export commonly used items
pub use cors::apply_cors_headers;
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    build_health_response, build_html_response, build_options_response, build_relay_response,
    json_response,
};
