pub use endpoint::Endpoint;
pub use record::AnchorRecord;
pub use resolver::{Resolver, Tally};
pub use selector::{Census, Selection, Selector};
pub use source::{IndexedRecords, RecordSource};
pub use wig::Wig;

mod endpoint;
mod record;
mod resolver;
mod selector;
mod source;
mod wig;
