//! Resolver configuration.
//!
//! An `autoload.json` document describes one resolver:
//!
//! ```json
//! {
//!   // exact symbol -> file
//!   "classMap": { "Legacy\\Kernel": "lib/Kernel.php" },
//!   "psr4": { "App\\": "src/", "App\\Tests\\": ["tests/"] },
//!   "psr0": { "Twig_": "vendor/twig/lib" },
//!   "fallbackPsr4": ["shared/"],
//!   "useIncludePath": false,
//!   "authoritative": "false",
//!   "cachePrefix": "app:",
//! }
//! ```
//!
//! Comments and trailing commas are accepted. Relative directories are
//! resolved against the directory passed to [`AutoloadConfig::build_resolver`],
//! normally the one containing the file.

use crate::cache::SymbolCache;
use crate::resolver::{Resolver, ResolverOptions};
use crate::search_path::SearchPath;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use symres_common::RegistrationError;
use symres_common::limits::DEFAULT_EXTENSION;
use tracing::debug;

/// Accepts both `true` and `"true"`-style strings for boolean options.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(value)) => Ok(Some(value)),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                text
            ))),
        },
    }
}

/// One directory or a list of directories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DirSpec {
    One(String),
    Many(Vec<String>),
}

impl DirSpec {
    fn resolve_against(&self, base_dir: &Path) -> Vec<PathBuf> {
        match self {
            DirSpec::One(dir) => vec![base_dir.join(dir)],
            DirSpec::Many(dirs) => dirs.iter().map(|dir| base_dir.join(dir)).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoloadConfig {
    #[serde(default)]
    pub class_map: IndexMap<String, String>,
    #[serde(default)]
    pub psr4: IndexMap<String, DirSpec>,
    #[serde(default)]
    pub psr0: IndexMap<String, DirSpec>,
    #[serde(default)]
    pub fallback_psr4: Vec<String>,
    #[serde(default)]
    pub fallback_psr0: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub use_include_path: Option<bool>,
    #[serde(default)]
    pub include_path: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub authoritative: Option<bool>,
    #[serde(default)]
    pub cache_prefix: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub secondary_extensions: Vec<String>,
}

impl AutoloadConfig {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            extension: self
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            secondary_extensions: self.secondary_extensions.clone(),
        }
    }

    /// `includePath` joined onto `base_dir`, or the `SYMRES_INCLUDE_PATH`
    /// search path when the config lists none.
    pub fn search_path(&self, base_dir: &Path) -> SearchPath {
        if self.include_path.is_empty() {
            return SearchPath::from_env_default();
        }
        SearchPath::new(self.include_path.iter().map(|dir| base_dir.join(dir)))
    }

    /// Build a resolver from this configuration.
    ///
    /// `cache_store` backs `cachePrefix`; without it the prefix is ignored.
    pub fn build_resolver(
        &self,
        base_dir: &Path,
        cache_store: Option<Arc<dyn SymbolCache>>,
    ) -> std::result::Result<Resolver, RegistrationError> {
        let mut resolver = Resolver::with_options(self.resolver_options())
            .with_search_path(self.search_path(base_dir));
        if let Some(store) = cache_store {
            resolver = resolver.with_cache_store(store);
        }

        resolver.add_class_map(
            self.class_map
                .iter()
                .map(|(symbol, path)| (symbol.clone(), base_dir.join(path))),
        );

        for (prefix, dirs) in &self.psr4 {
            resolver.add_psr4(prefix, dirs.resolve_against(base_dir), false)?;
        }
        resolver.add_fallback(self.fallback_psr4.iter().map(|dir| base_dir.join(dir)), false);

        for (prefix, dirs) in &self.psr0 {
            resolver.add_psr0(prefix, dirs.resolve_against(base_dir), false);
        }
        resolver.add_psr0(
            "",
            self.fallback_psr0.iter().map(|dir| base_dir.join(dir)),
            false,
        );

        resolver.set_use_search_path(self.use_include_path.unwrap_or(false));
        resolver.set_authoritative(self.authoritative.unwrap_or(false));
        resolver.set_cache_prefix(self.cache_prefix.as_deref());

        debug!(
            base_dir = %base_dir.display(),
            class_map = self.class_map.len(),
            psr4 = self.psr4.len(),
            psr0 = self.psr0.len(),
            "resolver built from config"
        );
        Ok(resolver)
    }
}

pub fn parse_config(source: &str) -> Result<AutoloadConfig> {
    let cleaned = strip_comments_and_trailing_commas(source);
    let config = serde_json::from_str(&cleaned).context("failed to parse autoload config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AutoloadConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read autoload config: {}", path.display()))?;
    parse_config(&source)
        .with_context(|| format!("failed to parse autoload config: {}", path.display()))
}

/// Load a configuration file and build its resolver, resolving relative
/// directories against the file's directory.
pub fn load_resolver(path: &Path, cache_store: Option<Arc<dyn SymbolCache>>) -> Result<Resolver> {
    let config = load_config(path)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    let resolver = config
        .build_resolver(base_dir, cache_store)
        .with_context(|| format!("invalid autoload config: {}", path.display()))?;
    Ok(resolver)
}

/// Drop `//` and `/* */` comments and commas directly before `}` or `]`,
/// leaving string contents untouched.
fn strip_comments_and_trailing_commas(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    // Byte index in `out` of a comma that may turn out to be trailing
    let mut pending_comma: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];

        if ch == b'"' {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            out.push_str(&input[start..i]);
            pending_comma = None;
            continue;
        }

        if ch == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        if ch == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                i += 1;
            }
            i = (i + 2).min(bytes.len());
            continue;
        }

        match ch {
            b',' => {
                pending_comma = Some(out.len());
                out.push(',');
            }
            b'}' | b']' => {
                if let Some(pos) = pending_comma.take() {
                    out.replace_range(pos..=pos, " ");
                }
                out.push(ch as char);
            }
            _ if ch.is_ascii_whitespace() => out.push(ch as char),
            _ => {
                pending_comma = None;
                // Copy the whole (possibly multi-byte) character
                let len = input[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&input[i..i + len]);
                i += len;
                continue;
            }
        }
        i += 1;
    }

    out
}
