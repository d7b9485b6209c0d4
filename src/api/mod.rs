pub mod error;
pub mod mock;
pub mod query;
pub mod remote;
pub mod traits;
pub mod types;

pub use error::ApiError;
pub use mock::MockListings;
pub use remote::RemoteListings;
pub use traits::PropertySource;
pub use types::{FilterParams, PagedResult, SortKey, SortOrder};
