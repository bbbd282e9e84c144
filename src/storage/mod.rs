pub mod memory;
pub mod traits;

pub use memory::MemoryReportCache;
pub use traits::ReportCache;
