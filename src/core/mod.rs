pub mod engine;
pub mod normalizer;
pub mod overlap;
pub mod pipeline;

pub use crate::domain::model::{AnalysisResult, EmployeePair, PairDuration, WorkPeriod};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
