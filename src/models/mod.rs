pub mod datatable;
pub mod room;
