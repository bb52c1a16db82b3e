use std::path::Path;

use crate::error::{PackagerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Vhdl,
    Verilog,
    SystemVerilog,
    SystemVerilogHeader,
    Xdc,
    Tcl,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "vhd" => Ok(FileKind::Vhdl),
            "v" => Ok(FileKind::Verilog),
            "sv" => Ok(FileKind::SystemVerilog),
            "svh" => Ok(FileKind::SystemVerilogHeader),
            "xdc" => Ok(FileKind::Xdc),
            "tcl" => Ok(FileKind::Tcl),
            other => Err(PackagerError::unsupported_format(format!(
                "file extension '.{}'",
                other
            ))),
        }
    }

    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                PackagerError::unsupported_format(format!("file without extension '{}'", path))
            })?;
        Self::from_extension(ext)
    }

    /// `spirit:fileType`, absent for constraint files
    pub fn file_type(&self) -> Option<&str> {
        match self {
            FileKind::Vhdl => Some("vhdlSource"),
            FileKind::Verilog => Some("verilogSource"),
            FileKind::SystemVerilog | FileKind::SystemVerilogHeader => Some("systemVerilogSource"),
            FileKind::Xdc => None,
            FileKind::Tcl => Some("tclSource"),
        }
    }

    pub fn user_file_type(&self) -> &str {
        match self {
            FileKind::Xdc => "xdc",
            FileKind::Tcl => "XGUI_VERSION_2",
            _ => "IMPORTED_FILE",
        }
    }

    /// File type of `add_fileset_file`; scripts are not registered
    pub fn to_quartus(&self) -> Option<&str> {
        match self {
            FileKind::Vhdl => Some("VHDL"),
            FileKind::Verilog | FileKind::SystemVerilog | FileKind::SystemVerilogHeader => {
                Some("VERILOG")
            }
            FileKind::Xdc => Some("XDC"),
            FileKind::Tcl => None,
        }
    }

    /// Member of the synthesis and simulation file sets
    pub fn is_hdl(&self) -> bool {
        !matches!(self, FileKind::Tcl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Path relative to the package directory
    pub name: String,
    pub kind: FileKind,
}

impl File {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            kind: FileKind::from_path(name)?,
        })
    }

    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.name)
    }
}

/// Named view over the component's files
#[derive(Debug, Clone)]
pub struct FileSet<'a> {
    pub name: &'static str,
    pub files: Vec<&'a File>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table_is_total() {
        for name in ["a.vhd", "a.v", "a.sv", "a.svh", "a.xdc", "a.tcl", "A.VHD"] {
            assert!(File::new(name).is_ok(), "{}", name);
        }
        for name in ["a.txt", "a.vhdl", "Makefile"] {
            assert!(matches!(File::new(name), Err(PackagerError::UnsupportedFormat(_))));
        }
    }

    #[test]
    fn test_file_kinds() {
        let xdc = File::new("src/top/pins.xdc").unwrap();
        assert_eq!(xdc.kind.file_type(), None);
        assert_eq!(xdc.kind.user_file_type(), "xdc");
        assert_eq!(xdc.base_name(), "pins.xdc");

        let gui = File::new("xgui/gui.tcl").unwrap();
        assert!(!gui.kind.is_hdl());
        assert_eq!(gui.kind.to_quartus(), None);

        assert_eq!(FileKind::SystemVerilog.to_quartus(), Some("VERILOG"));
    }
}
