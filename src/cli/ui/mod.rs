pub mod style;
pub mod table;

pub use style::{style, UiStyle};
pub use table::{Table, TableColumn, TableRenderer};
