//! Bundled tool table and path resolution
//!
//! Maps logical tool names to their files inside the extracted
//! `platform-tools` directory.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ToolsError;

/// An executable shipped in the platform-tools archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Android Debug Bridge
    Adb,
    /// Partition flashing tool
    Fastboot,
    /// Method trace dump viewer
    Dmtracedump,
    /// ETC1 texture compression tool
    Etc1tool,
    /// HPROF heap dump converter
    HprofConv,
    /// SQLite shell
    Sqlite3,
}

impl Tool {
    /// Every known tool, required ones first
    pub const ALL: [Tool; 6] = [
        Tool::Adb,
        Tool::Fastboot,
        Tool::Dmtracedump,
        Tool::Etc1tool,
        Tool::HprofConv,
        Tool::Sqlite3,
    ];

    /// Logical name, also the file stem inside `platform-tools/`
    pub fn name(self) -> &'static str {
        match self {
            Tool::Adb => "adb",
            Tool::Fastboot => "fastboot",
            Tool::Dmtracedump => "dmtracedump",
            Tool::Etc1tool => "etc1tool",
            Tool::HprofConv => "hprof-conv",
            Tool::Sqlite3 => "sqlite3",
        }
    }

    /// Whether an install without this tool counts as broken
    pub fn is_required(self) -> bool {
        matches!(self, Tool::Adb | Tool::Fastboot)
    }

    /// File name on the host, with `.exe` on Windows
    pub fn file_name(self) -> String {
        format!("{}{}", self.name(), std::env::consts::EXE_SUFFIX)
    }

    /// Location of the tool inside a platform-tools directory
    pub fn path_in(self, platform_tools_dir: &Path) -> PathBuf {
        platform_tools_dir.join(self.file_name())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s || (s == "hprofconv" && *tool == Tool::HprofConv))
            .ok_or_else(|| ToolsError::UnknownTool {
                name: s.to_string(),
            })
    }
}

/// Absolute paths to the extracted tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolPaths {
    /// The extracted `platform-tools` directory
    pub platform_tools: PathBuf,
    /// `adb` executable
    pub adb: PathBuf,
    /// `fastboot` executable
    pub fastboot: PathBuf,
    /// `dmtracedump`, when shipped
    pub dmtracedump: Option<PathBuf>,
    /// `etc1tool`, when shipped
    pub etc1tool: Option<PathBuf>,
    /// `hprof-conv`, when shipped
    pub hprof_conv: Option<PathBuf>,
    /// `sqlite3`, when shipped
    pub sqlite3: Option<PathBuf>,
}

impl ToolPaths {
    /// Resolve tool paths in an existing platform-tools directory
    ///
    /// Fails if the directory or any required tool is missing. Relative
    /// directories are made absolute against the current directory.
    pub fn resolve(platform_tools_dir: &Path) -> Result<Self, ToolsError> {
        if !platform_tools_dir.is_dir() {
            return Err(ToolsError::NotInstalled {
                path: platform_tools_dir.to_path_buf(),
            });
        }

        let dir = if platform_tools_dir.is_absolute() {
            platform_tools_dir.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(platform_tools_dir))
                .unwrap_or_else(|_| platform_tools_dir.to_path_buf())
        };

        let required = |tool: Tool| -> Result<PathBuf, ToolsError> {
            let path = tool.path_in(&dir);
            if path.is_file() {
                Ok(path)
            } else {
                Err(ToolsError::MissingTool {
                    tool: tool.name().to_string(),
                    path: dir.clone(),
                })
            }
        };
        let optional = |tool: Tool| Some(tool.path_in(&dir)).filter(|p| p.is_file());

        Ok(Self {
            adb: required(Tool::Adb)?,
            fastboot: required(Tool::Fastboot)?,
            dmtracedump: optional(Tool::Dmtracedump),
            etc1tool: optional(Tool::Etc1tool),
            hprof_conv: optional(Tool::HprofConv),
            sqlite3: optional(Tool::Sqlite3),
            platform_tools: dir,
        })
    }

    /// Path of a tool, if present
    pub fn get(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::Adb => Some(&self.adb),
            Tool::Fastboot => Some(&self.fastboot),
            Tool::Dmtracedump => self.dmtracedump.as_deref(),
            Tool::Etc1tool => self.etc1tool.as_deref(),
            Tool::HprofConv => self.hprof_conv.as_deref(),
            Tool::Sqlite3 => self.sqlite3.as_deref(),
        }
    }

    /// Path of a tool, or `MissingTool`
    pub fn require(&self, tool: Tool) -> Result<&Path, ToolsError> {
        self.get(tool).ok_or_else(|| ToolsError::MissingTool {
            tool: tool.name().to_string(),
            path: self.platform_tools.clone(),
        })
    }

    /// Present tools in table order
    pub fn iter(&self) -> impl Iterator<Item = (Tool, &Path)> + '_ {
        Tool::ALL
            .into_iter()
            .filter_map(move |tool| self.get(tool).map(|p| (tool, p)))
    }
}

/// Whether a directory holds every required tool
pub fn has_required_tools(platform_tools_dir: &Path) -> bool {
    Tool::ALL
        .into_iter()
        .filter(|tool| tool.is_required())
        .all(|tool| tool.path_in(platform_tools_dir).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_tools(dir: &Path, tools: &[Tool]) {
        fs::create_dir_all(dir).unwrap();
        for tool in tools {
            fs::write(tool.path_in(dir), b"").unwrap();
        }
    }

    #[test]
    fn test_tool_names_roundtrip() {
        for tool in Tool::ALL {
            assert_eq!(tool.name().parse::<Tool>().unwrap(), tool);
        }
        assert_eq!("hprofconv".parse::<Tool>().unwrap(), Tool::HprofConv);
    }

    #[test]
    fn test_unknown_tool_name() {
        let err = "aapt".parse::<Tool>().unwrap_err();
        assert!(matches!(err, ToolsError::UnknownTool { name } if name == "aapt"));
    }

    #[test]
    fn test_file_name_suffix() {
        #[cfg(windows)]
        assert_eq!(Tool::Adb.file_name(), "adb.exe");

        #[cfg(not(windows))]
        assert_eq!(Tool::Adb.file_name(), "adb");
    }

    #[test]
    fn test_required_tools() {
        let required: Vec<_> = Tool::ALL.into_iter().filter(|t| t.is_required()).collect();
        assert_eq!(required, vec![Tool::Adb, Tool::Fastboot]);
    }

    #[test]
    fn test_resolve_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = ToolPaths::resolve(&temp.path().join("platform-tools"));
        assert!(matches!(result, Err(ToolsError::NotInstalled { .. })));
    }

    #[test]
    fn test_resolve_missing_required_tool() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("platform-tools");
        touch_tools(&dir, &[Tool::Adb]);

        let result = ToolPaths::resolve(&dir);
        assert!(matches!(result, Err(ToolsError::MissingTool { tool, .. }) if tool == "fastboot"));
        assert!(!has_required_tools(&dir));
    }

    #[test]
    fn test_resolve_full_install() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("platform-tools");
        touch_tools(&dir, &Tool::ALL);

        let paths = ToolPaths::resolve(&dir).unwrap();

        assert!(paths.platform_tools.is_absolute());
        assert_eq!(paths.adb, Tool::Adb.path_in(&dir));
        assert_eq!(paths.hprof_conv, Some(Tool::HprofConv.path_in(&dir)));
        assert_eq!(paths.iter().count(), 6);
        assert!(has_required_tools(&dir));
    }

    #[test]
    fn test_resolve_without_optional_tools() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("platform-tools");
        touch_tools(&dir, &[Tool::Adb, Tool::Fastboot, Tool::Sqlite3]);

        let paths = ToolPaths::resolve(&dir).unwrap();

        assert!(paths.dmtracedump.is_none());
        assert!(paths.get(Tool::Sqlite3).is_some());
        assert!(matches!(
            paths.require(Tool::Etc1tool),
            Err(ToolsError::MissingTool { .. })
        ));
        let names: Vec<_> = paths.iter().map(|(t, _)| t.name()).collect();
        assert_eq!(names, vec!["adb", "fastboot", "sqlite3"]);
    }
}
