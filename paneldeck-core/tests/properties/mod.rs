//! Property test modules

mod dnd_tests;
mod layout_tree_tests;
mod snapshot_tests;
mod store_tests;
