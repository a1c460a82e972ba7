pub mod context;

pub use context::EditorContext;
