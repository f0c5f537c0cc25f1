//! Local book persistence and the in-memory photo upload simulation.

use base64::Engine as _;
use indexmap::IndexMap;

use crate::model::{Book, Photo};
use crate::storage::KeyValueStorage;
use crate::{Error, Result};

/// Fixed storage key holding the JSON array of book snapshots.
pub const STORAGE_KEY: &str = "memoir_books";

/// Raw bytes handed to [`BookService::upload_photo`].
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    /// MIME type reported by the caller. Guessed from the bytes when absent.
    pub content_type: Option<String>,
    pub caption: Option<String>,
}

impl PhotoUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Default::default()
        }
    }
}

pub trait BookService {
    /// All stored books, in storage order.
    fn get_books(&self) -> Result<Vec<Book>>;

    fn get_book(&self, id: &str) -> Result<Option<Book>>;

    /// Inserts a new book or replaces the stored book with the same id (keeping its position).
    fn save_book(&self, book: &Book) -> Result<Book>;

    fn delete_book(&self, id: &str) -> Result<()>;

    /// Turns raw image bytes into a placeable [`Photo`]. Nothing leaves the process.
    fn upload_photo(&self, upload: &PhotoUpload) -> Result<Photo>;
}

/// [`BookService`] backed by a [`KeyValueStorage`].
#[derive(Debug)]
pub struct LocalBookService<S> {
    storage: S,
}

impl<S: KeyValueStorage> LocalBookService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load_from_storage(&self) -> Result<IndexMap<String, Book>> {
        let Some(raw) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(IndexMap::new());
        };
        let books: Vec<Book> = match serde_json::from_str(&raw) {
            Ok(books) => books,
            Err(err) => {
                tracing::warn!(error = %err, "stored book snapshot is unreadable; treating as empty");
                return Ok(IndexMap::new());
            }
        };
        let mut index = IndexMap::with_capacity(books.len());
        for book in books {
            index.entry(book.id.clone()).or_insert(book);
        }
        Ok(index)
    }

    fn save_to_storage(&self, books: &IndexMap<String, Book>) -> Result<()> {
        let list: Vec<&Book> = books.values().collect();
        let raw = serde_json::to_string(&list)?;
        self.storage.set_item(STORAGE_KEY, &raw)
    }

    pub async fn get_books_async(&self) -> Result<Vec<Book>> {
        self.get_books()
    }

    pub async fn get_book_async(&self, id: &str) -> Result<Option<Book>> {
        self.get_book(id)
    }

    pub async fn save_book_async(&self, book: &Book) -> Result<Book> {
        self.save_book(book)
    }

    pub async fn delete_book_async(&self, id: &str) -> Result<()> {
        self.delete_book(id)
    }

    pub async fn upload_photo_async(&self, upload: &PhotoUpload) -> Result<Photo> {
        self.upload_photo(upload)
    }
}

impl<S: KeyValueStorage> BookService for LocalBookService<S> {
    fn get_books(&self) -> Result<Vec<Book>> {
        Ok(self.load_from_storage()?.into_values().collect())
    }

    fn get_book(&self, id: &str) -> Result<Option<Book>> {
        Ok(self.load_from_storage()?.shift_remove(id))
    }

    fn save_book(&self, book: &Book) -> Result<Book> {
        let mut books = self.load_from_storage()?;
        books.insert(book.id.clone(), book.clone());
        self.save_to_storage(&books)?;
        tracing::debug!(book_id = %book.id, books = books.len(), "saved book");
        Ok(book.clone())
    }

    fn delete_book(&self, id: &str) -> Result<()> {
        let mut books = self.load_from_storage()?;
        if books.shift_remove(id).is_some() {
            self.save_to_storage(&books)?;
        }
        Ok(())
    }

    fn upload_photo(&self, upload: &PhotoUpload) -> Result<Photo> {
        if upload.bytes.is_empty() {
            return Err(Error::Upload {
                message: "empty file".to_string(),
            });
        }

        let probe = probe_image(&upload.bytes);
        let content_type = upload
            .content_type
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| probe.as_ref().map(|p| p.mime.to_string()))
            .ok_or_else(|| Error::Upload {
                message: "unrecognized image format".to_string(),
            })?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(&upload.bytes);
        let mut photo = Photo::new(
            uuid::Uuid::new_v4().to_string(),
            format!("data:{content_type};base64,{encoded}"),
        );
        photo.caption = upload.caption.clone();
        if let Some(p) = probe.and_then(|p| p.dimensions) {
            photo.width = Some(p.0);
            photo.height = Some(p.1);
        }
        photo.pending_upload = true;
        Ok(photo)
    }
}

struct ImageProbe {
    mime: &'static str,
    dimensions: Option<(u32, u32)>,
}

fn probe_image(bytes: &[u8]) -> Option<ImageProbe> {
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    let dimensions = match reader.into_dimensions() {
        Ok(d) => Some(d),
        Err(err) => {
            tracing::debug!(error = %err, "could not read image dimensions");
            None
        }
    };
    Some(ImageProbe {
        mime: format.to_mime_type(),
        dimensions,
    })
}
