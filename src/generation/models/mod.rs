pub mod generate_image_response;
pub mod generation_request;
pub mod generation_result;
pub mod pipeline_args;
