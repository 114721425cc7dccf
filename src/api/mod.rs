pub mod dexscreener;
pub mod discord;
