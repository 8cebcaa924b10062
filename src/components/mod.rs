pub mod canvas;
pub mod help;
pub mod options;
