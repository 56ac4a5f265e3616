pub mod outline;

pub use outline::{render_outline, render_subtree};
