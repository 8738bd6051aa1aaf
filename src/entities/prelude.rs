//! `SeaORM` Entity prelude

pub use super::exchange_logs::Entity as ExchangeLogs;
pub use super::exchanges::Entity as Exchanges;
pub use super::sync_status::Entity as SyncStatus;
