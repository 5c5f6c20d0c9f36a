pub mod sunrise_sunset;
