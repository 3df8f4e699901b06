pub mod demand;
pub mod health;
pub mod inventory;
pub mod logistics;
pub mod reports;
pub mod scenarios;
