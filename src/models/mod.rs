pub mod record;
pub mod soap;

pub use record::{CompositeRecord, FlatRecord, RecordKey};
pub use soap::SoapSection;
