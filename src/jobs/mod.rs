pub mod price_backfill_sync;
