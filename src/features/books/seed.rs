//! Sample catalog inserted on first startup.

use crate::core::error::{AppError, Result};
use crate::features::books::models::NewBook;
use crate::features::books::repositories::CatalogStore;

const SAMPLE_CATEGORIES: [&str; 4] = ["Fiction", "Non-Fiction", "Science", "History"];

struct SampleBook {
    title: &'static str,
    author: &'static str,
    category: &'static str,
    isbn: &'static str,
    publication_year: i32,
    description: &'static str,
}

const SAMPLE_BOOKS: [SampleBook; 5] = [
    SampleBook {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        category: "Fiction",
        isbn: "978-0743273565",
        publication_year: 1925,
        description: "A story of the fabulously wealthy Jay Gatsby and his love for the beautiful Daisy Buchanan.",
    },
    SampleBook {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        category: "Fiction",
        isbn: "978-0446310789",
        publication_year: 1960,
        description: "The story of young Scout Finch and her father Atticus in a racially divided Alabama town.",
    },
    SampleBook {
        title: "A Brief History of Time",
        author: "Stephen Hawking",
        category: "Science",
        isbn: "978-0553380163",
        publication_year: 1988,
        description: "A popular science book about cosmology and the universe.",
    },
    SampleBook {
        title: "The Art of War",
        author: "Sun Tzu",
        category: "History",
        isbn: "978-0140439199",
        publication_year: -500,
        description: "An ancient Chinese text on military strategy and tactics.",
    },
    SampleBook {
        title: "1984",
        author: "George Orwell",
        category: "Fiction",
        isbn: "978-0451524935",
        publication_year: 1949,
        description: "A dystopian novel about totalitarianism and surveillance society.",
    },
];

/// Insert the sample categories, then the sample books of every sample
/// category that holds no books yet.
///
/// Returns the number of books inserted.
pub async fn seed_sample_data(store: &dyn CatalogStore) -> Result<usize> {
    let mut tx = store.begin().await?;
    let mut inserted = 0;

    for name in SAMPLE_CATEGORIES {
        if !tx.exists_category_by_name(name).await? {
            tx.insert_category(name).await?;
        }

        let category = tx
            .find_category_by_name(name)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Sample category '{}' missing", name)))?;

        if !tx.find_books_by_category(&category).await?.is_empty() {
            tracing::debug!("Category {:?} already has books, skipping samples", name);
            continue;
        }

        for sample in SAMPLE_BOOKS.iter().filter(|b| b.category == name) {
            if tx
                .exists_book_by_title_and_author(sample.title, sample.author)
                .await?
            {
                continue;
            }

            tx.insert_book(NewBook {
                title: sample.title.to_string(),
                author: sample.author.to_string(),
                isbn: Some(sample.isbn.to_string()),
                publication_year: Some(sample.publication_year),
                description: Some(sample.description.to_string()),
                category: category.clone(),
            })
            .await?;
            inserted += 1;
        }
    }

    tx.commit().await?;

    if inserted > 0 {
        tracing::info!("Sample data initialized: {} books", inserted);
    } else {
        tracing::info!("Sample categories already populated, nothing to seed");
    }

    Ok(inserted)
}
