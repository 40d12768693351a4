pub mod run_example_dto;
