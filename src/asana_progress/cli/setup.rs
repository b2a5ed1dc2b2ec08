use clap::Parser;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "asana-progress", bin_name = "asana-progress", version = get_version())]
#[command(
    about = "Console progress bars for every Asana project you can see",
    long_about = "Console progress bars for every Asana project you can see.\n\n\
                  Without a token argument, a previously saved token is used, or you are \
                  asked for one and it is saved for later runs."
)]
pub struct Cli {
    /// Asana personal access token (used for this run only, never saved)
    #[arg(env = "ASANA_API_KEY", hide_env_values = true)]
    pub token: Option<String>,
}
