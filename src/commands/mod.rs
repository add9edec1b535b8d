pub mod check;
pub mod run;

// Re-export command functions for convenience
pub use check::check;
pub use run::run;
