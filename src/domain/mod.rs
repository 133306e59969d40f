pub mod account;
pub mod collection;
pub mod filter;
pub mod props;
pub mod record;
pub mod transfer;
