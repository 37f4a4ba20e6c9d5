//! Constants describing the corebot framework layout
//!
//! Everything the pipeline knows about the framework lives here: where the
//! source snapshot comes from, how the extracted tree is shaped and which
//! filesystem signals mark a host project.

/// GitHub organization and repository of the framework
pub const GITHUB_ORG: &str = "corebot-io";
pub const GITHUB_REPO: &str = "corebot";

/// Branch whose snapshot is fetched and built
pub const BRANCH: &str = "dev";

/// Name prefix of the extracted snapshot root (`corebot-dev` for branch dev)
pub const ROOT_PREFIX: &str = "corebot-";

/// Core package location inside the framework monorepo
pub const CORE_SUBDIR: &str = "packages/core";

/// Host-project config file marking the external-plugin convention
pub const CONFIG_FILE: &str = "corebot.yml";

/// Published name prefix for scaffolded extensions
pub const EXTENSION_PREFIX: &str = "corebot-extension-";

/// Default source-archive mirror host
pub const DEFAULT_MIRROR: &str = "https://github.com";

/// Environment variable overriding the mirror host
pub const MIRROR_ENV: &str = "BOTFORGE_MIRROR_URL";

/// Per-user build cache directory under the home directory
pub const BUILD_CACHE_DIR: &str = ".buildcache";

/// Archive URL for the framework branch snapshot on `mirror_base`
pub fn archive_url(mirror_base: &str) -> String {
    format!(
        "{}/{}/{}/archive/refs/heads/{}.zip",
        mirror_base.trim_end_matches('/'),
        GITHUB_ORG,
        GITHUB_REPO,
        BRANCH
    )
}

/// Mirror base from the environment, falling back to the default host
pub fn mirror_base() -> String {
    std::env::var(MIRROR_ENV).unwrap_or_else(|_| DEFAULT_MIRROR.to_string())
}
