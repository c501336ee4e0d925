use serde::Deserialize;
use ustr::Ustr;

use crate::error::ViewError;
use crate::view::DEFAULT_ITEMS_PER_PAGE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin of the users API, without the `/api` suffix.
    pub api_base_url: String,
    pub items_per_page: usize,
}

/// Environment overrides, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawEnvConfig {
    userdir_api_base_url: Option<String>,
    userdir_items_per_page: Option<usize>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    /// Overlay `USERDIR_API_BASE_URL` / `USERDIR_ITEMS_PER_PAGE` from `vars`.
    pub fn overlay_vars<I, S>(mut self, vars: I) -> Result<Self, serde_env::Error>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawEnvConfig = serde_env::from_iter(vars)?;
        self.apply_overrides(raw.userdir_api_base_url, raw.userdir_items_per_page);
        Ok(self)
    }

    /// Replace fields that are set; empty strings count as unset.
    pub fn apply_overrides(&mut self, api_base_url: Option<String>, items_per_page: Option<usize>) {
        if let Some(url) = api_base_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Using API base URL {url}");
            self.api_base_url = url;
        }
        if let Some(per_page) = items_per_page {
            self.items_per_page = per_page;
        }
    }

    /// Base for API routes, e.g. `http://localhost:8080/api`.
    pub fn api_url(&self) -> Ustr {
        let base = self.api_base_url.trim_end_matches('/');
        if base.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{base}/api"))
        }
    }

    pub fn validate(&self) -> Result<(), ViewError> {
        if self.items_per_page == 0 {
            return Err(ViewError::InvalidItemsPerPage(0));
        }
        Ok(())
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(if cfg!(target_arch = "wasm32") {
            // Same origin as the page.
            ""
        } else {
            DEFAULT_API_BASE_URL
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BusinessConfig::default();
        assert_eq!(config.items_per_page, 6);

        if cfg!(target_arch = "wasm32") {
            assert_eq!(config.api_url(), Ustr::from("/api"));
        } else {
            assert_eq!(config.api_url(), Ustr::from("http://localhost:8080/api"));
        }
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let config = BusinessConfig::new("https://users.example.com/");
        assert_eq!(config.api_url(), Ustr::from("https://users.example.com/api"));
    }

    #[test]
    fn test_env_vars_override_defaults() {
        let config = BusinessConfig::default().overlay_vars(vec![
            ("USERDIR_API_BASE_URL", "http://10.0.0.2:9000"),
            ("USERDIR_ITEMS_PER_PAGE", "12"),
            ("UNRELATED", "ignored"),
        ])
        .expect("config should deserialize");

        assert_eq!(config.api_base_url, "http://10.0.0.2:9000");
        assert_eq!(config.items_per_page, 12);
    }

    #[test]
    fn test_no_env_vars_is_default() {
        let config = BusinessConfig::default()
            .overlay_vars(Vec::<(String, String)>::new())
            .unwrap();
        assert_eq!(config, BusinessConfig::default());
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let mut base = BusinessConfig::new("http://from-file:1");
        base.items_per_page = 9;

        let config = base.overlay_vars(vec![("USERDIR_ITEMS_PER_PAGE", "3")]).unwrap();

        assert_eq!(config.api_base_url, "http://from-file:1");
        assert_eq!(config.items_per_page, 3);
    }

    #[test]
    fn test_empty_url_override_is_ignored() {
        let mut config = BusinessConfig::default();
        config.apply_overrides(Some("  ".to_owned()), None);
        assert_eq!(config, BusinessConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = BusinessConfig::default();
        config.items_per_page = 0;
        assert_eq!(config.validate(), Err(ViewError::InvalidItemsPerPage(0)));
    }
}
