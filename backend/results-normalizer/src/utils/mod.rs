pub mod numeric;
pub mod retry;
