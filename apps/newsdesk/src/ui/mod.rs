//! Page surface: the element tree the orchestrators render into, plus the
//! blocking dialogs (alert/confirm) a page offers.

pub mod dialogs;
pub mod document;
pub mod markup;
pub mod page;

pub use dialogs::{Dialogs, RecordingDialogs, TerminalDialogs};
pub use document::MemoryPage;
pub use markup::{el, Element, Node};
pub use page::Page;
