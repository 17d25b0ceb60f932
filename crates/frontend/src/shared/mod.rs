pub mod api_utils;
pub mod submit_bridge;
