/// Gets the value of an environment variable, treating an empty value as unset.
///
/// # Arguments
///
/// * `key` - The environment variable name to retrieve
///
/// # Returns
///
/// * `Option<String>` - The environment variable value if it exists and is non-empty
pub fn get_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
