pub mod service;

pub use service::LeadService;
