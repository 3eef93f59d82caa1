// Adapters layer: concrete implementations for external systems (http, apis, console).

pub mod console;
pub mod http;
pub mod placeholder_api;
pub mod sunrise_api;
