//! Batch orchestration: ports for the external collaborators (tabular
//! readers/writers, diagnostic sink), diagnostic artifact naming, and the
//! end-to-end run.

mod diagnostics;
mod memory;
mod ports;
mod run;

pub use diagnostics::*;
pub use memory::*;
pub use ports::*;
pub use run::*;
