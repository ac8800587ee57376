mod console;

pub use console::{ConsoleRenderer, RenderSummary};
