pub mod logging;

pub use logging::LoggingMiddleware;
