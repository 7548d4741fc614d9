pub mod entity;
pub mod flag;
pub mod notification;
