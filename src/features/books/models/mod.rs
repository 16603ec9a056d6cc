pub mod book;
pub mod category;

pub use book::{Book, BookRow, NewBook};
pub use category::Category;
