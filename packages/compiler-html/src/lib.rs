//! # Pagesmith HTML Compiler
//!
//! Serializes a rendered [`pagesmith_renderer::VirtualPage`] into a static
//! HTML document. Gesture bindings become `data-*` attributes: static
//! buttons carry `data-navigate` with a resolved href, and a small script
//! follows it on click.

mod compiler;


pub use compiler::{compile_nodes, compile_page, escape_html, resolve_link, CompileError, CompileOptions};
