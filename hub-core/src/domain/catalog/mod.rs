pub mod filter;
pub mod model;
pub mod relations;
pub mod rewriter;
pub mod version;
pub mod view;

pub use filter::{QueryCriteria, ResourceQuery};
pub use model::{Catalog, ResourceId, ResourceRecord, ResourceRow, Tag, TagRow, Version, VersionRow};
pub use relations::RelationSet;
pub use view::{ResourceView, ViewProjector};
