pub mod dispatcher;
pub mod health;
pub mod ledger;
pub mod payment;
pub mod queue;
pub mod repository;
