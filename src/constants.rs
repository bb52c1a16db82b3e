// File set names
pub const SYNTH_FILESET_NAME: &str = "xilinx_anylanguagesynthesis";
pub const SIM_FILESET_NAME: &str = "xilinx_anylanguagebehavioralsimulation_view_fileset";
pub const GUI_FILESET_NAME: &str = "xilinx_xpgui_view_fileset";

// XML namespaces
pub const NS_SPIRIT: &str = "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1685-2009";
pub const NS_XILINX: &str = "http://www.xilinx.com";
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

// Parameter id prefixes
pub const PARAM_VALUE_PREFIX: &str = "PARAM_VALUE.";
pub const MODELPARAM_VALUE_PREFIX: &str = "MODELPARAM_VALUE.";
pub const BUSIFPARAM_VALUE_PREFIX: &str = "BUSIFPARAM_VALUE.";

/// Name of the implicit first component parameter.
pub const COMPONENT_NAME_PARAM: &str = "Component_Name";

// Defaults
pub const DEFAULT_COMPONENT_VERSION: &str = "1.0";
pub const DEFAULT_QUARTUS_VERSION: &str = "16.1";
pub const DEFAULT_XILINX_VERSION: &str = "2014.4.1";
pub const DEFAULT_VENDOR: &str = "hwt";
pub const DEFAULT_LIBRARY: &str = "mylib";

// Package layout
pub const COMPONENT_XML_FILE: &str = "component.xml";
pub const COMPONENT_TCL_FILE: &str = "component_hw.tcl";
pub const SRC_DIR: &str = "src";
pub const GUI_DIR: &str = "xgui";
pub const GUI_FILE: &str = "gui.tcl";

/// View name refs listed on every port wire type.
pub const WIRE_VIEW_NAME_REFS: [&str; 2] =
    ["xilinx_vhdlsynthesis", "xilinx_vhdlbehavioralsimulation"];
