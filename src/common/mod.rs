pub mod constants;
pub mod numeric;
