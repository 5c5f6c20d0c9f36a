pub mod sun_api;
pub mod year_fetch;
