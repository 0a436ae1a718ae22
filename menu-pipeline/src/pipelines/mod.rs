pub mod menu_analysis;
