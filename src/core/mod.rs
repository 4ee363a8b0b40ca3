//! Core compilation pipeline.
//!
//! 1. **Lexing** (`lexer`): source text → delimiter and literal tokens
//! 2. **Parsing** (`parser`): tokens → per-file definitions
//! 3. **Resolution** (`resolver`): merged definitions → [`Codex`] with embeds inlined
//! 4. **Rendering** (`render`): entry + substitutions → text
//!
//! [`Localizer`] drives the pipeline over a [`Storage`] and serves lookups.

pub mod codex;
pub mod delimiters;
pub mod discovery;
pub mod entry;
pub mod error;
pub mod lexer;
pub mod localizer;
pub mod parser;
pub mod render;
pub mod resolver;
pub mod storage;

pub use codex::Codex;
pub use delimiters::Delimiters;
pub use entry::{Definition, Definitions, Entry, Segment};
pub use error::{CompileError, DelimiterError, ErrorKind, Origin};
pub use lexer::{Position, Token, TokenKind, tokenize};
pub use localizer::{
    FAIL_ENTRY_NAME, Localizer, Snapshot, compile_fail_entry, compile_language,
    default_fail_template, load_definitions,
};
pub use parser::{merge, parse, parse_source, parse_value};
pub use render::{FAIL_KEY_VARIABLE, PermanentTable, RenderContext, UnresolvedPolicy, render};
pub use resolver::{resolve, resolve_entry};
pub use storage::{FsStorage, MemoryStorage, Storage};
