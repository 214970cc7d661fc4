//! Install command rendering per package manager

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Registry namespace used by the shadcn CLI for HextaUI items
pub const REGISTRY_NAMESPACE: &str = "@hextaui";

/// Package manager used to run the shadcn CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Package runner prefix for one-off CLI execution
    fn runner(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npx",
            PackageManager::Pnpm => "pnpm dlx",
            PackageManager::Yarn => "yarn dlx",
            PackageManager::Bun => "bunx --bun",
        }
    }

    /// Default install command for a catalog id
    pub fn install_command(&self, id: &str) -> String {
        format!(
            "{} shadcn@latest add {}/{}",
            self.runner(),
            REGISTRY_NAMESPACE,
            id
        )
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown package manager '{0}'. Expected one of: npm, pnpm, yarn, bun")]
pub struct UnknownPackageManager(pub String);

impl FromStr for PackageManager {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PackageManager::ALL
            .into_iter()
            .find(|pm| pm.as_str() == wanted)
            .ok_or_else(|| UnknownPackageManager(s.to_string()))
    }
}
