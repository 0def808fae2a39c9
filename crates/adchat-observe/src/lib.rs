//! Observability setup for adchat: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
