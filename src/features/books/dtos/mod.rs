pub mod book_dto;

pub use book_dto::{BookDto, BookRequestDto, SearchBooksQuery};
