//! Front-end adapters

pub mod console;

pub use console::ConsoleAdapter;
