pub mod book_handler;

pub use book_handler::{
    __path_create_book, __path_delete_book, __path_get_all_books, __path_get_books_by_category,
    __path_search_books, __path_update_book, create_book, delete_book, get_all_books,
    get_books_by_category, search_books, update_book,
};
