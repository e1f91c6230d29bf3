// Module exports for shell logic
pub mod backstack;           // Back-signal history ledger
pub mod surface;             // Launch plan for the browser surface
