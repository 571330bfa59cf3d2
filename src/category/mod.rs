pub mod handlers;
pub mod models;

pub use handlers::list_categories;
pub use models::Category;
