pub mod mock;

pub use mock::{MockDataGenerator, TREND_VIEW_CEILING};
