static PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct Version {
    pub semversion: semver::Version,
}

impl Version {
    pub fn from_env() -> Self {
        // we set PEOPL_TEST_VERSION in integration tests
        // (so that version checks are deterministic)
        let semversion = std::env::var("PEOPL_TEST_VERSION")
            .ok()
            .and_then(|version| semver::Version::parse(&version).ok())
            .or_else(|| semver::Version::parse(PKG_VERSION).ok())
            .unwrap_or_else(|| semver::Version::new(0, 0, 0));
        Self { semversion }
    }
}
