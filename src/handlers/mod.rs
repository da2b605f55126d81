pub mod event_handler;
pub mod member;
pub mod message;
