mod loader;
mod normalize;
mod schema;
mod search;

pub use loader::{load_catalog, read_csv_catalog, read_json_catalog};
pub use normalize::{RawCatalog, RawCell, normalize_catalog};
pub use schema::{CatalogField, SchemaMapping};
pub use search::search_foods;
