pub mod catalog;
pub mod convert;
pub mod session;
pub mod setup;
pub mod ui;
pub mod view;
