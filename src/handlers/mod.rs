/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions,
/// and returning a properly formatted response.

mod accept_handlers;
mod place_handlers;
mod place_image_handlers;
mod rating_handlers;

// Re-export all handlers
pub use accept_handlers::*;
pub use place_handlers::*;
pub use place_image_handlers::*;
pub use rating_handlers::*;
