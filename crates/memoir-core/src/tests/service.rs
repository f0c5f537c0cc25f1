use crate::*;
use futures::executor::block_on;

fn book(id: &str, title: &str) -> Book {
    let mut b = editor::create_book(title, "someone");
    b.id = id.to_string();
    b
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[test]
fn save_book_inserts_then_replaces_in_place() {
    let svc = LocalBookService::new(MemoryStorage::new());
    svc.save_book(&book("a", "First")).unwrap();
    svc.save_book(&book("b", "Second")).unwrap();
    svc.save_book(&book("a", "First, edited")).unwrap();

    let books = svc.get_books().unwrap();
    let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(books[0].title, "First, edited");
}

#[test]
fn get_and_delete_book() {
    let svc = LocalBookService::new(MemoryStorage::new());
    svc.save_book(&book("a", "A")).unwrap();
    assert_eq!(svc.get_book("a").unwrap().map(|b| b.title), Some("A".to_string()));
    assert_eq!(svc.get_book("missing").unwrap(), None);

    svc.delete_book("a").unwrap();
    svc.delete_book("a").unwrap();
    assert!(svc.get_books().unwrap().is_empty());
}

#[test]
fn unreadable_snapshot_is_treated_as_no_data() {
    let storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "{not json").unwrap();
    let svc = LocalBookService::new(storage);
    assert!(svc.get_books().unwrap().is_empty());

    svc.save_book(&book("a", "A")).unwrap();
    assert_eq!(svc.get_books().unwrap().len(), 1);
}

#[test]
fn snapshots_persist_under_the_fixed_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = LocalBookService::new(FileStorage::new(dir.path()));
    svc.save_book(&book("a", "A")).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("memoir_books.json")).expect("snapshot");
    let v: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert!(v.is_array());
    assert_eq!(v[0]["id"], "a");
    assert_eq!(v[0]["pageSize"], "A4");

    let reopened = LocalBookService::new(FileStorage::new(dir.path()));
    assert_eq!(reopened.get_books().unwrap().len(), 1);
}

#[test]
fn async_wrappers_delegate_to_sync_operations() {
    let svc = LocalBookService::new(MemoryStorage::new());
    block_on(svc.save_book_async(&book("a", "A"))).unwrap();
    let books = block_on(svc.get_books_async()).unwrap();
    assert_eq!(books.len(), 1);
    assert!(block_on(svc.get_book_async("a")).unwrap().is_some());
    block_on(svc.delete_book_async("a")).unwrap();
    assert!(block_on(svc.get_books_async()).unwrap().is_empty());
}

#[test]
fn upload_produces_data_uri_with_probed_dimensions() {
    let svc = LocalBookService::new(MemoryStorage::new());
    let mut upload = PhotoUpload::new(png_bytes(8, 5));
    upload.caption = Some("beach".to_string());

    let photo = block_on(svc.upload_photo_async(&upload)).unwrap();
    assert!(photo.url.starts_with("data:image/png;base64,"));
    assert_eq!(photo.source(), PhotoSource::DataUri);
    assert_eq!((photo.width, photo.height), (Some(8), Some(5)));
    assert_eq!(photo.caption.as_deref(), Some("beach"));
    assert!(photo.pending_upload);
    assert!(uuid::Uuid::parse_str(&photo.id).is_ok());
}

#[test]
fn upload_rejects_empty_and_unknown_payloads() {
    let svc = LocalBookService::new(MemoryStorage::new());
    assert!(matches!(
        svc.upload_photo(&PhotoUpload::new(Vec::new())),
        Err(Error::Upload { .. })
    ));
    assert!(matches!(
        svc.upload_photo(&PhotoUpload::new(b"hello".to_vec())),
        Err(Error::Upload { .. })
    ));

    let mut typed = PhotoUpload::new(b"opaque".to_vec());
    typed.content_type = Some("image/heic".to_string());
    let photo = svc.upload_photo(&typed).unwrap();
    assert!(photo.url.starts_with("data:image/heic;base64,"));
    assert_eq!(photo.width, None);
}
