pub mod backend;
pub mod draft;
pub mod identity_service;
pub mod pricing;
