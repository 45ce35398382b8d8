// src/pipeline/readers/decoder.rs

use std::cell::Cell;
use std::panic;
use std::sync::Once;

use crate::data_model::RawDocument;
use crate::error::{PipelineError, Result};

/// Turns a document's bytes into raw text.
pub trait DocumentDecoder: Send + Sync {
    fn decode(&self, document: &RawDocument) -> Result<String>;
}

/// PDF text extraction for `.pdf` files, lossy UTF-8 for everything else.
///
/// Plain text never fails: invalid sequences become U+FFFD. A PDF that cannot
/// be parsed is a `DecodeError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecoder;

impl DocumentDecoder for DefaultDecoder {
    fn decode(&self, document: &RawDocument) -> Result<String> {
        if document.is_pdf() {
            decode_pdf(document)
        } else {
            Ok(String::from_utf8_lossy(&document.bytes).into_owned())
        }
    }
}

fn decode_pdf(document: &RawDocument) -> Result<String> {
    let decode_error = |reason: String| PipelineError::DecodeError {
        filename: document.filename.clone(),
        reason,
    };
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let bytes = document.bytes.as_slice();
    match catch_quietly(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(decode_error(e.to_string())),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "PDF parser panicked".to_string());
            Err(decode_error(reason))
        }
    }
}

thread_local! {
    static SILENCED: Cell<bool> = const { Cell::new(false) };
}

static INSTALL_HOOK: Once = Once::new();

/// `catch_unwind` without the panic hook's stderr report for panics raised
/// inside `f`. Panics on other threads, or outside `f`, still reach the
/// previously installed hook.
fn catch_quietly<F, R>(f: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SILENCED.with(Cell::get) {
                previous(info);
            }
        }));
    });
    SILENCED.with(|s| s.set(true));
    let result = panic::catch_unwind(f);
    SILENCED.with(|s| s.set(false));
    result
}
