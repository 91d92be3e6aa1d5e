//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a desktop-scope cache.
///
/// The defaults reproduce the standard accessibility bus layout;
/// overriding them is only needed against test or sandboxed buses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
	/// Well-known name of the registry daemon.
	#[serde(default = "default_registry_name")]
	pub registry_name: String,
	/// Object path of the desktop root on the registry.
	#[serde(default = "default_root_path")]
	pub root_path: String,
	/// Name given to the synthesized desktop root entry.
	#[serde(default = "default_desktop_name")]
	pub desktop_name: String,
}

fn default_registry_name() -> String {
	aspen_bus::REGISTRY_NAME.to_owned()
}

fn default_root_path() -> String {
	aspen_bus::ROOT_PATH.to_owned()
}

fn default_desktop_name() -> String {
	"main".to_owned()
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			registry_name: default_registry_name(),
			root_path: default_root_path(),
			desktop_name: default_desktop_name(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		let config: CacheConfig = toml::from_str("").unwrap();
		assert_eq!(config.registry_name, aspen_bus::REGISTRY_NAME);
		assert_eq!(config.root_path, aspen_bus::ROOT_PATH);
		assert_eq!(config.desktop_name, "main");
	}

	#[test]
	fn fields_override_independently() {
		let config: CacheConfig =
			toml::from_str(r#"registry_name = "org.example.Registry""#).unwrap();
		assert_eq!(config.registry_name, "org.example.Registry");
		assert_eq!(config.root_path, aspen_bus::ROOT_PATH);
	}
}
