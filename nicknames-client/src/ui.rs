//! User interface collaborators
//!
//! The plugin never draws anything itself. Notifications, confirmation
//! dialogs and text prompts go through [`Ui`]; the clipboard-like exchange
//! used by export and import goes through [`TextSink`] and [`TextSource`].

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A yes/no dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub content: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

/// A single-line text prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub title: String,
    /// Shown while the field is empty
    pub placeholder: String,
    pub initial_value: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

pub trait Ui {
    fn toast(&self, message: &str, level: ToastLevel);

    /// Ask the user to confirm; `false` means cancelled
    fn confirm(&self, confirmation: &Confirmation) -> bool;

    /// Ask for a line of text; `None` means cancelled
    fn prompt_text(&self, prompt: &InputPrompt) -> Option<String>;
}

/// Where exported text is written (the clipboard, usually)
pub trait TextSink {
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Where imported text is read from
///
/// Reading is the only suspend point of an import. `Ok(None)` means there
/// was nothing to read.
#[async_trait(?Send)]
pub trait TextSource {
    async fn read_text(&self) -> io::Result<Option<String>>;
}

/// In-memory clipboard
#[derive(Debug, Default)]
pub struct ClipboardBuffer {
    contents: RefCell<Option<String>>,
}

impl ClipboardBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(text.into())),
        }
    }

    /// Take the buffered text, leaving the buffer empty
    pub fn take(&self) -> Option<String> {
        self.contents.borrow_mut().take()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl TextSink for ClipboardBuffer {
    fn write_text(&self, text: &str) -> io::Result<()> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[async_trait(?Send)]
impl TextSource for ClipboardBuffer {
    async fn read_text(&self) -> io::Result<Option<String>> {
        Ok(self
            .contents
            .borrow()
            .clone()
            .filter(|text| !text.trim().is_empty()))
    }
}

/// Import source backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl TextSource for FileSource {
    async fn read_text(&self) -> io::Result<Option<String>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(Some(text).filter(|text| !text.trim().is_empty()))
    }
}
