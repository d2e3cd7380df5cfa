//! Man macro subset: lexing into tokens and rendering to styled text.
mod lexer;
mod render;
mod style;
mod token;

pub use render::render_document;
pub use style::Styles;
