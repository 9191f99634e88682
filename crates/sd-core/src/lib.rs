pub mod buffer;
pub mod collection;
pub mod color;
pub mod config;
pub mod emitter;
pub mod format;
pub mod id;
pub mod lint;
pub mod model;
pub mod parser;

pub use buffer::{Line, LineRange, TextBuffer};
pub use collection::ShapeCollection;
pub use color::{ColorResolver, resolve_color};
pub use config::{ConfigError, EditorConfig, EditorConfigBuilder};
pub use emitter::{emit_lines, serialize};
pub use format::{canonicalize, format_text};
pub use id::ShapeId;
pub use lint::{LineDiagnostic, LintSeverity, lint_text};
pub use model::*;
pub use parser::{LineError, parse, parse_line};
