pub mod key_heatmap;
pub mod menu;
pub mod progress_bar;
pub mod stats_panel;
pub mod summary;
pub mod theme_picker;
pub mod typing_area;
