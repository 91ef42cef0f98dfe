//! Filesystem output modules.
//!
//! These modules own everything that touches disk:
//!
//! - [`files`]: writes one site's three feed bodies
//! - [`indexes`]: renders and writes the `index.html` landing page
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── example-news.xml    # RSS 2.0
//! ├── example-news.atom   # Atom 1.0
//! ├── example-news.json   # JSON Feed
//! └── index.html          # links to every generated feed
//! ```

pub mod files;
pub mod indexes;
