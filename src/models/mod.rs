//! Data models for tmsearch.

mod trademark;

pub use trademark::{TrademarkRecord, NO_IMAGE_FOUND};
