pub mod client;

pub use client::SunriseSunsetClient;
