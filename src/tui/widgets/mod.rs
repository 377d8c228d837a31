pub mod color;
pub mod editor;
pub mod field_details;
pub mod help;
pub mod status_bar;
pub mod tag_input;
