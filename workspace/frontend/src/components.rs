pub mod charts;
pub mod dashboard;
pub mod forecast;
pub mod form;
pub mod inventory;
pub mod layout;
pub mod logistics;
pub mod reports;
pub mod scenarios;
pub mod settings;
