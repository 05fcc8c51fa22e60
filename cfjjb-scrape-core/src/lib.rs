//! CFJJB Scrape Core Library
//!
//! This library provides core functionality for scraping the CFJJB
//! competition calendar and generating the Elm data module consumed by the
//! front-end.

pub mod codegen;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod ident;
pub mod normalize;
pub mod source;
pub mod types;
pub mod vocab;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        codegen::*, dedupe::*, extract::*, ident::*, normalize::*, source::*, types::*, vocab::*,
    };
}
