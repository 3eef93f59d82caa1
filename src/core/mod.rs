pub mod countdown;
pub mod dates;
pub mod file_info;
pub mod join;
pub mod lifecycle;
pub mod schedule;
pub mod stats;
pub mod sunrise;

pub use crate::domain::model::{Coordinates, SunriseComparison, SunriseReport};
pub use crate::domain::ports::{Renderer, SunriseProvider};
pub use crate::utils::error::Result;
