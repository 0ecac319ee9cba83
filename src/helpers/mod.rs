//! Helper functions shared by the resolver, the CLI and the views

mod html;
mod list;
mod url;

pub use html::*;
pub use list::*;
pub use url::*;
