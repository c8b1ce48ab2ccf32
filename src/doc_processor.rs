use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("PDF parse error: {0}")]
    Pdf(String),
    #[error("Unsupported file type: .{0}")]
    Unsupported(String),
}

/// Extracted text of the reference document, loaded once at startup.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    text: String,
    pages: usize,
}

impl DocumentContext {
    /// Build a context from already-extracted page texts.
    ///
    /// Pages with no text are skipped; every kept page is followed by a newline.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut kept = 0;
        for page in pages {
            let page = page.as_ref();
            // Whitespace-only pages carry no intent text and are dropped too.
            if page.trim().is_empty() {
                continue;
            }
            text.push_str(page);
            text.push('\n');
            kept += 1;
        }
        Self { text, pages: kept }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages that contributed text.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Load a document file and extract its text page by page.
pub fn load_document(path: &Path) -> Result<DocumentContext, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let read_err = |source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let pages = match ext.as_str() {
        "txt" | "md" | "markdown" => vec![fs::read_to_string(path).map_err(read_err)?],
        "pdf" => {
            let bytes = fs::read(path).map_err(read_err)?;
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
                .map_err(|e| DocumentError::Pdf(e.to_string()))?
        }
        _ => return Err(DocumentError::Unsupported(ext)),
    };

    let total = pages.len();
    let context = DocumentContext::from_pages(&pages);
    info!(
        path = %path.display(),
        pages = context.pages(),
        skipped = total - context.pages(),
        chars = context.len(),
        "loaded document context"
    );
    Ok(context)
}
