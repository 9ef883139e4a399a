pub mod addon;
pub mod appointment;
pub mod event;
pub mod faq;
pub mod invoice;
pub mod reservation;
pub mod review;
pub mod user;
pub mod validation;
