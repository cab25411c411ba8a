use crate::error::JdkWatchError;

pub fn get_exit_code(error: &JdkWatchError) -> i32 {
    match error {
        JdkWatchError::InvalidVersionFormat(_)
        | JdkWatchError::InvalidConfig(_)
        | JdkWatchError::ConfigError(_)
        | JdkWatchError::Config(_) => 2,

        JdkWatchError::NetworkError(_)
        | JdkWatchError::Http(_)
        | JdkWatchError::MetadataFetch(_) => 20,

        _ => 1,
    }
}
