pub mod remote_generate_response;
