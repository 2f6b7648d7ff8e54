pub mod omdb;
pub mod traits;

pub use omdb::OmdbCatalog;
pub use traits::CatalogService;
