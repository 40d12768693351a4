pub mod example_entry;
