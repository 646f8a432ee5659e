pub mod caching;
pub mod er_api;
pub mod util;

pub use caching::CachingRateSource;
pub use er_api::ErApiProvider;
