mod fixture;
mod yahoo;

pub use fixture::FixtureMetricSource;
pub use yahoo::YahooMetricSource;
