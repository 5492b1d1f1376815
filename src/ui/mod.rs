pub mod components;
pub mod layout;
pub mod lesson_entry;
pub mod theme;
