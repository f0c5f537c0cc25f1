use memoir::render::{HeadlessError, HeadlessRenderer, ViewOptions};
use memoir_core::{Book, LayoutKind, MemoirConfig};
use memoir_render::units::PAGE_SIZES;
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(memoir_core::Error),
    Render(memoir_render::Error),
    Headless(HeadlessError),
    Json(serde_json::Error),
    PageNotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::PageNotFound(id) => write!(f, "No page with id {id} in this book"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<memoir_core::Error> for CliError {
    fn from(value: memoir_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<memoir_render::Error> for CliError {
    fn from(value: memoir_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Layout,
    #[default]
    Render,
    Overflow,
    Pages,
    Sizes,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    configs: Vec<String>,
    pretty: bool,
    view: ViewOptions,
    page: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverflowOut<'a> {
    page_id: &'a str,
    layout: &'a str,
    capacity: usize,
    total: usize,
    hidden: usize,
    hidden_photo_ids: &'a [String],
}

fn usage() -> &'static str {
    "memoir-cli\n\
\n\
USAGE:\n\
  memoir-cli layout [--pretty] [--config <path>] [--scale <n> | --auto <w>x<h>] [--page <page-id>] [<path>|-]\n\
  memoir-cli [render] [--config <path>] [--scale <n> | --auto <w>x<h>] [--page <page-id>] [--out <path>] [<path>|-]\n\
  memoir-cli overflow [--pretty] [<path>|-]\n\
  memoir-cli pages [<path>|-]\n\
  memoir-cli sizes\n\
\n\
NOTES:\n\
  - <path> is a book snapshot (JSON). If omitted or '-', it is read from stdin.\n\
  - layout prints the computed page layouts as JSON; render prints SVG.\n\
  - Without --page every page of the book is processed, in reading order.\n\
  - --scale sets a manual display scale (clamped to 0.2..1.5); --auto fits the page\n\
    into a <w>x<h> pixel container.\n\
  - --config may be repeated; later files override earlier ones key by key.
  - Set MEMOIR_LOG (e.g. MEMOIR_LOG=debug) to see fallback diagnostics on stderr.\n\
"
}

fn parse_container(text: &str) -> Option<(f64, f64)> {
    let (w, h) = text.split_once(['x', 'X'])?;
    let w = w.trim().parse::<f64>().ok()?;
    let h = h.trim().parse::<f64>().ok()?;
    (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then_some((w, h))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "overflow" => args.command = Command::Overflow,
            "pages" => args.command = Command::Pages,
            "sizes" => args.command = Command::Sizes,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.configs.push(path.clone());
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !scale.is_finite() {
                    return Err(CliError::Usage(usage()));
                }
                args.view = ViewOptions::manual(scale);
            }
            "--auto" => {
                let Some(container) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let (w, h) = parse_container(container).ok_or(CliError::Usage(usage()))?;
                args.view = ViewOptions::auto(w, h);
            }
            "--page" => {
                let Some(page) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.page = Some(page.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// Loads and layers config files; later files override earlier ones.
fn load_config(paths: &[String]) -> Result<MemoirConfig, CliError> {
    let mut config = MemoirConfig::default();
    for path in paths {
        config.merge(&MemoirConfig::from_json_str(&std::fs::read_to_string(path)?)?);
    }
    Ok(config)
}

/// Finds the chapter holding `page_id`.
fn locate_page<'a>(book: &'a Book, page_id: &str) -> Result<&'a str, CliError> {
    book.pages()
        .find(|(_, _, page)| page.id == page_id)
        .map(|(_, chapter, _)| chapter.id.as_str())
        .ok_or_else(|| CliError::PageNotFound(page_id.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MEMOIR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_sizes() {
    for size in PAGE_SIZES {
        println!(
            "{}\t{}\t{}x{} mm",
            size.key, size.display_name, size.width_mm, size.height_mm
        );
    }
}

fn load_book(input: Option<&str>) -> Result<Book, CliError> {
    let book = memoir_render::book_from_json(&read_input(input)?)?;
    tracing::debug!(book = %book.id, pages = book.page_count(), "loaded book snapshot");
    Ok(book)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args.configs)?;
    let headless = HeadlessRenderer::from_config(&config).with_view(args.view);

    match args.command {
        Command::Sizes => {
            print_sizes();
            Ok(())
        }
        Command::Layout => {
            let book = load_book(args.input.as_deref())?;
            let renderer = headless.page_renderer();
            match args.page.as_deref() {
                Some(page_id) => {
                    let chapter_id = locate_page(&book, page_id)?;
                    let page =
                        renderer.render_book_page(&book, chapter_id, page_id, args.view)?;
                    write_json(&page, args.pretty)
                }
                None => write_json(&headless.layout_book(&book), args.pretty),
            }
        }
        Command::Render => {
            let book = load_book(args.input.as_deref())?;
            let svg = match args.page.as_deref() {
                Some(page_id) => {
                    let chapter_id = locate_page(&book, page_id)?;
                    headless.render_page_svg_sync(&book, chapter_id, page_id)?
                }
                None => headless.render_book_svg_sync(&book),
            };
            write_text(&svg, args.out.as_deref())
        }
        Command::Overflow => {
            let book = load_book(args.input.as_deref())?;
            let pages = headless.layout_book(&book);
            let out: Vec<OverflowOut<'_>> = pages
                .iter()
                .filter(|p| !p.overflow.is_empty())
                .map(|p| OverflowOut {
                    page_id: &p.page_id,
                    layout: p.layout_kind.as_str(),
                    capacity: p.overflow.capacity,
                    total: p.overflow.total,
                    hidden: p.overflow.hidden,
                    hidden_photo_ids: &p.overflow.hidden_photo_ids,
                })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Pages => {
            let book = load_book(args.input.as_deref())?;
            for (number, (_, chapter, page)) in book.pages().enumerate() {
                let resolved = page.layout_kind().unwrap_or(LayoutKind::Single);
                println!(
                    "{}\t{}\t{}\t{} -> {}\t{} photos",
                    number + 1,
                    chapter.id,
                    page.id,
                    page.layout,
                    resolved.as_str(),
                    page.photos.len()
                );
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
