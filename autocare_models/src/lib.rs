pub mod email_address;
mod macros;
pub mod service_request;
