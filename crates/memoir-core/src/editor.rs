//! Editing operations over a [`Book`] value.
//!
//! Every operation either applies completely or leaves the book untouched and returns an error.
//! Chapters always keep at least one page.

use crate::model::{Book, Chapter, LayoutKind, Page, Photo, Theme, DEFAULT_PAGE_SIZE};
use crate::{Error, Result};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

pub fn create_book(title: &str, author: &str) -> Book {
    Book {
        id: new_id(),
        title: title.to_string(),
        author: author.to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
        theme: Theme::Classic,
        page_size: DEFAULT_PAGE_SIZE.to_string(),
        chapters: Vec::new(),
    }
}

/// Appends a chapter dated today with one empty `single` page. Returns the new chapter id.
pub fn add_chapter(book: &mut Book, title: &str) -> String {
    let chapter = Chapter {
        id: new_id(),
        title: title.to_string(),
        date: today_iso(),
        pages: vec![Page::new(new_id(), LayoutKind::Single)],
    };
    let id = chapter.id.clone();
    book.chapters.push(chapter);
    id
}

fn chapter_mut<'a>(book: &'a mut Book, chapter_id: &str) -> Result<&'a mut Chapter> {
    book.chapters
        .iter_mut()
        .find(|c| c.id == chapter_id)
        .ok_or_else(|| Error::not_found("chapter", chapter_id))
}

fn page_mut<'a>(book: &'a mut Book, chapter_id: &str, page_id: &str) -> Result<&'a mut Page> {
    chapter_mut(book, chapter_id)?
        .pages
        .iter_mut()
        .find(|p| p.id == page_id)
        .ok_or_else(|| Error::not_found("page", page_id))
}

pub fn rename_chapter(book: &mut Book, chapter_id: &str, title: &str) -> Result<()> {
    chapter_mut(book, chapter_id)?.title = title.to_string();
    Ok(())
}

/// Sets the chapter date. Only `YYYY-MM-DD` dates are accepted.
pub fn set_chapter_date(book: &mut Book, chapter_id: &str, date: &str) -> Result<()> {
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(Error::invalid_edit(format!("not an ISO date: {date}")));
    }
    chapter_mut(book, chapter_id)?.date = date.to_string();
    Ok(())
}

pub fn delete_chapter(book: &mut Book, chapter_id: &str) -> Result<Chapter> {
    let idx = book
        .chapters
        .iter()
        .position(|c| c.id == chapter_id)
        .ok_or_else(|| Error::not_found("chapter", chapter_id))?;
    Ok(book.chapters.remove(idx))
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize, what: &str) -> Result<()> {
    if from >= items.len() || to >= items.len() {
        return Err(Error::invalid_edit(format!(
            "{what} position out of range: {from} -> {to} (len {})",
            items.len()
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

pub fn move_chapter(book: &mut Book, from: usize, to: usize) -> Result<()> {
    move_item(&mut book.chapters, from, to, "chapter")
}

/// Inserts a new empty page after `after_page_id` (or at the end). Returns the new page id.
pub fn add_page(
    book: &mut Book,
    chapter_id: &str,
    layout: LayoutKind,
    after_page_id: Option<&str>,
) -> Result<String> {
    let chapter = chapter_mut(book, chapter_id)?;
    let page = Page::new(new_id(), layout);
    let id = page.id.clone();
    let at = match after_page_id {
        Some(after) => {
            chapter
                .pages
                .iter()
                .position(|p| p.id == after)
                .ok_or_else(|| Error::not_found("page", after))?
                + 1
        }
        None => chapter.pages.len(),
    };
    chapter.pages.insert(at, page);
    Ok(id)
}

pub fn delete_page(book: &mut Book, chapter_id: &str, page_id: &str) -> Result<Page> {
    let chapter = chapter_mut(book, chapter_id)?;
    let idx = chapter
        .pages
        .iter()
        .position(|p| p.id == page_id)
        .ok_or_else(|| Error::not_found("page", page_id))?;
    if chapter.pages.len() == 1 {
        return Err(Error::invalid_edit("a chapter must keep at least one page"));
    }
    Ok(chapter.pages.remove(idx))
}

pub fn move_page(book: &mut Book, chapter_id: &str, from: usize, to: usize) -> Result<()> {
    move_item(&mut chapter_mut(book, chapter_id)?.pages, from, to, "page")
}

pub fn set_page_layout(
    book: &mut Book,
    chapter_id: &str,
    page_id: &str,
    layout: LayoutKind,
) -> Result<()> {
    page_mut(book, chapter_id, page_id)?.layout = layout.as_str().to_string();
    Ok(())
}

pub fn set_page_content(
    book: &mut Book,
    chapter_id: &str,
    page_id: &str,
    content: &str,
) -> Result<()> {
    page_mut(book, chapter_id, page_id)?.content = content.to_string();
    Ok(())
}

/// Appends a photo to the page. Photo ids must be unique within the page.
pub fn add_photo(book: &mut Book, chapter_id: &str, page_id: &str, photo: Photo) -> Result<()> {
    let page = page_mut(book, chapter_id, page_id)?;
    if page.photos.iter().any(|p| p.id == photo.id) {
        return Err(Error::invalid_edit(format!(
            "photo {} is already on page {page_id}",
            photo.id
        )));
    }
    page.photos.push(photo);
    Ok(())
}

pub fn remove_photo(
    book: &mut Book,
    chapter_id: &str,
    page_id: &str,
    photo_id: &str,
) -> Result<Photo> {
    let page = page_mut(book, chapter_id, page_id)?;
    let idx = page
        .photos
        .iter()
        .position(|p| p.id == photo_id)
        .ok_or_else(|| Error::not_found("photo", photo_id))?;
    Ok(page.photos.remove(idx))
}

/// Reorders a photo within its page. Order decides which layout slot a photo lands in.
pub fn move_photo(
    book: &mut Book,
    chapter_id: &str,
    page_id: &str,
    from: usize,
    to: usize,
) -> Result<()> {
    move_item(&mut page_mut(book, chapter_id, page_id)?.photos, from, to, "photo")
}

pub fn set_theme(book: &mut Book, theme: Theme) {
    book.theme = theme;
}

pub fn set_page_size(book: &mut Book, key: &str) {
    book.page_size = key.to_string();
}
