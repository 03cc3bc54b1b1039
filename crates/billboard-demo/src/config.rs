use std::path::PathBuf;

use anyhow::{bail, Result};

/// Demo settings fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Billboard textures: the tree pair when set, the wall pair otherwise.
    pub use_tree: bool,
    /// Initial ground visibility; `G` toggles it at runtime.
    pub show_ground: bool,
    /// Root holding `shader/` and `images/`.
    pub data_dir: PathBuf,
    /// Vertical field of view, degrees.
    pub field_of_view_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            use_tree: false,
            show_ground: true,
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            field_of_view_y: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl DemoConfig {
    pub const DATA_DIR_VAR: &'static str = "BILLBOARD_DATA_DIR";
    pub const USE_TREE_VAR: &'static str = "BILLBOARD_USE_TREE";
    pub const SHOW_GROUND_VAR: &'static str = "BILLBOARD_SHOW_GROUND";

    /// Defaults overridden by the `BILLBOARD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(Self::DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(Self::USE_TREE_VAR) {
            config.use_tree = parse_flag(Self::USE_TREE_VAR, &value)?;
        }
        if let Some(value) = lookup(Self::SHOW_GROUND_VAR) {
            config.show_ground = parse_flag(Self::SHOW_GROUND_VAR, &value)?;
        }

        Ok(config)
    }

    pub fn shader_path(&self, file: &str) -> PathBuf {
        self.data_dir.join("shader").join(file)
    }

    pub fn image_path(&self, file: &str) -> PathBuf {
        self.data_dir.join("images").join(file)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{name}: expected a boolean, got `{other}`"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let c = DemoConfig::default();
        assert!(!c.use_tree);
        assert!(c.show_ground);
        assert_eq!(c.field_of_view_y, 60.0);
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 100.0);
        assert!(c.data_dir.ends_with("data"));
    }

    #[test]
    fn environment_overrides() {
        let c = DemoConfig::from_lookup(lookup(&[
            ("BILLBOARD_DATA_DIR", "/srv/assets"),
            ("BILLBOARD_USE_TREE", "Yes"),
            ("BILLBOARD_SHOW_GROUND", "0"),
        ]))
        .unwrap();

        assert!(c.use_tree);
        assert!(!c.show_ground);
        assert_eq!(c.shader_path("billboard.wgsl"), Path::new("/srv/assets/shader/billboard.wgsl"));
        assert_eq!(c.image_path("ground.dds"), Path::new("/srv/assets/images/ground.dds"));
    }

    #[test]
    fn bad_flag_names_the_variable() {
        let err = DemoConfig::from_lookup(lookup(&[("BILLBOARD_USE_TREE", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("BILLBOARD_USE_TREE"));
    }
}
