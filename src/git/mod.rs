mod service;

pub use service::GitService;
