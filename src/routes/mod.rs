pub mod charge;
pub mod health;
pub mod transaction;
