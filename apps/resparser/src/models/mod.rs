pub mod ranking;
pub mod record;
