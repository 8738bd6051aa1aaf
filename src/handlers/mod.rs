pub mod exchange;
pub mod graphql;
pub mod health;
pub mod volume;
