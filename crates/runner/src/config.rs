// runner/src/config.rs
use crate::commit::DEFAULT_BLOCK_LIMIT;
use crate::tools::ExitPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RPC_URL: &str = "http://localhost:8214";
pub const DEFAULT_SENDER: &str = "0xc8328aabcd9b9e8e64fbc566c4385c3bdeb219d7";

/// Everything a run needs: the three required positionals plus optional
/// settings loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub target_dir: PathBuf,
    pub privkey_path: PathBuf,
    pub node_bin: PathBuf,
    #[serde(default)]
    pub settings: RunSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub rpc: RpcSettings,
    pub commands: CommandSettings,
    pub scenarios: ScenarioSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    pub url: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    pub signer: String,
    pub broadcaster: String,
    pub block_limit: u32,
    pub exit_policy: ExitPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    pub verify: bool,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.into(),
            sender: DEFAULT_SENDER.into(),
        }
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            signer: "polyjuice-ng".into(),
            broadcaster: "ckb-cli".into(),
            block_limit: DEFAULT_BLOCK_LIMIT,
            exit_policy: ExitPolicy::Strict,
        }
    }
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self { verify: true }
    }
}

impl RunSettings {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(settings)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl RunConfig {
    pub fn new(
        target_dir: impl Into<PathBuf>,
        privkey_path: impl Into<PathBuf>,
        node_bin: impl Into<PathBuf>,
        settings: RunSettings,
    ) -> Self {
        Self {
            target_dir: target_dir.into(),
            privkey_path: privkey_path.into(),
            node_bin: node_bin.into(),
            settings,
        }
    }

    /// Working directory of the node: the directory holding its binary.
    pub fn node_dir(&self) -> anyhow::Result<PathBuf> {
        let absolute = if self.node_bin.is_absolute() {
            self.node_bin.clone()
        } else {
            std::env::current_dir()?.join(&self.node_bin)
        };
        absolute
            .parent()
            .map(Path::to_path_buf)
            .with_context(|| format!("node binary {} has no parent directory", absolute.display()))
    }
}
