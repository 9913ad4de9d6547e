//! Browser lifecycle: launch, session wiring, and trace capture.

pub mod launch;
pub mod session;
pub mod trace;

pub use session::BrowserSession;
pub use trace::TraceRecorder;
