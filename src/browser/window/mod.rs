//! Top-level browsing contexts.
//!
//! Each [`Window`] is a tab or window of the session. The remote end scopes
//! page operations to whichever window it currently considers current, so
//! every window and element operation first makes its window the first
//! responder and then sends its own request.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Window struct, first-responder switch, close |
//! | `cookies` | Cookies of the current document |
//! | `navigation` | URL navigation, title |
//! | `geometry` | Window rect, maximize, minimize, fullscreen |
//! | `document` | Page source, script execution, ready state |
//! | `elements` | Element discovery |
//! | `print` | PDF rendering |
//! | `screenshot` | Window screenshots |
//! | `waiting` | Element and document waits |
//!
//! # Example
//!
//! ```ignore
//! let window = session.window().await?;
//!
//! window.navigate("https://example.com").await?;
//! window.wait_for_document(DocumentCondition::Ready, WaitOptions::default()).await?;
//!
//! let link = window.find_element(By::tag(HtmlTag::A)).await?;
//! link.click().await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod cookies;
mod core;
mod document;
mod elements;
mod geometry;
mod navigation;
mod print;
mod screenshot;
mod waiting;

// ============================================================================
// Re-exports
// ============================================================================

pub use core::Window;

pub(crate) use screenshot::decode_base64;
