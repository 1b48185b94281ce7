//! Command: print version information.

/// Version string: the release version when built by CI, else a dev build.
#[must_use]
pub fn version() -> &'static str {
    option_env!("CONFIG_UTILS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("config-utils {}", version());
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
