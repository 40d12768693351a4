use chrono::{DateTime, Local};

pub const FILE_NAME_TIMESTAMP_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

/// Second resolution, so two calls within the same second yield the same name.
pub fn file_name_timestamp(now: &DateTime<Local>) -> String {
    now.format(FILE_NAME_TIMESTAMP_FORMAT).to_string()
}
