/// Business logic layer for blog-service
///
/// - `blog`: page assemblers for the public pages
/// - `serializers`: flattening of query projections into template records
pub mod blog;
pub mod serializers;

pub use blog::{BlogService, IndexContext, PostDetailContext, TagFilterContext};
