use crate::config::{PackagerConfig, SupportedFamily};
use crate::constants::{GUI_FILESET_NAME, SIM_FILESET_NAME, SYNTH_FILESET_NAME};
use crate::error::Result;
use crate::model::{BusInterface, File, FileSet, Parameter, Port, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub display_name: String,
    pub env_identifier: String,
    pub model_name: Option<String>,
    pub file_set_ref: &'static str,
}

impl View {
    fn new(
        name: &str,
        display_name: &str,
        env_identifier: &str,
        model_name: Option<&str>,
        file_set_ref: &'static str,
    ) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            env_identifier: env_identifier.to_string(),
            model_name: model_name.map(|n| n.to_string()),
            file_set_ref,
        }
    }
}

/// Generic mirrored into the structural model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelParameter {
    pub name: String,
    pub display_name: String,
    pub data_type: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub views: Vec<View>,
    pub ports: Vec<Port>,
    pub model_parameters: Vec<ModelParameter>,
}

impl Model {
    /// Synthesis, simulation and UI layout views of module `name`
    pub fn with_default_views(name: &str) -> Self {
        let views = vec![
            View::new(
                "xilinx_anylanguagesynthesis",
                "Synthesis",
                "vhdlSource:vivado.xilinx.com:synthesis",
                Some(name),
                SYNTH_FILESET_NAME,
            ),
            View::new(
                "xilinx_anylanguagebehavioralsimulation",
                "Simulation",
                "vhdlSource:vivado.xilinx.com:simulation",
                Some(name),
                SIM_FILESET_NAME,
            ),
            View::new(
                "xilinx_xpgui",
                "UI Layout",
                ":vivado.xilinx.com:xgui.ui",
                None,
                GUI_FILESET_NAME,
            ),
        ];

        Self {
            views,
            ports: Vec::new(),
            model_parameters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorExtensions {
    pub supported_families: Vec<SupportedFamily>,
    pub taxonomies: Vec<String>,
    pub xilinx_version: String,
}

impl VendorExtensions {
    pub fn from_config(config: &PackagerConfig) -> Self {
        Self {
            supported_families: config.supported_families.clone(),
            taxonomies: config.taxonomies.clone(),
            xilinx_version: config.xilinx_version.clone(),
        }
    }
}

/// Packaged IP core, independent of the output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub vendor: String,
    pub library: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Sorted by name
    pub bus_interfaces: Vec<BusInterface>,
    pub model: Model,
    pub files: Vec<File>,
    /// The first parameter is always the component name
    pub parameters: Vec<Parameter>,
    pub vendor_extensions: VendorExtensions,
}

impl Component {
    pub fn new(name: &str, config: &PackagerConfig) -> Self {
        Self {
            vendor: String::new(),
            library: String::new(),
            name: name.to_string(),
            version: config.component_version.clone(),
            description: String::new(),
            bus_interfaces: Vec::new(),
            model: Model::with_default_views(name),
            files: Vec::new(),
            parameters: Vec::new(),
            vendor_extensions: VendorExtensions::from_config(config),
        }
    }

    /// Identity stamp `<name>_v<version>`
    pub fn display_name(&self) -> String {
        format!("{}_v{}", self.name, self.version)
    }

    /// Register a package file; a name that is already listed is ignored
    pub fn add_file(&mut self, name: &str) -> Result<()> {
        let file = File::new(name)?;
        if !self.files.iter().any(|f| f.name == file.name) {
            self.files.push(file);
        }
        Ok(())
    }

    /// Synthesis, simulation and GUI file sets, always all three
    pub fn file_sets(&self) -> [FileSet<'_>; 3] {
        let hdl: Vec<&File> = self.files.iter().filter(|f| f.kind.is_hdl()).collect();
        let gui: Vec<&File> = self.files.iter().filter(|f| !f.kind.is_hdl()).collect();
        [
            FileSet {
                name: SYNTH_FILESET_NAME,
                files: hdl.clone(),
            },
            FileSet {
                name: SIM_FILESET_NAME,
                files: hdl,
            },
            FileSet {
                name: GUI_FILESET_NAME,
                files: gui,
            },
        ]
    }

    pub fn bus_interface(&self, name: &str) -> Option<&BusInterface> {
        self.bus_interfaces.iter().find(|b| b.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sets_share_files() {
        let mut c = Component::new("adder8", &PackagerConfig::default());
        c.add_file("src/adder8/adder8.vhd").unwrap();
        c.add_file("src/adder8/pins.xdc").unwrap();
        c.add_file("xgui/gui.tcl").unwrap();

        let [syn, sim, gui] = c.file_sets();
        assert_eq!(syn.name, "xilinx_anylanguagesynthesis");
        assert_eq!(syn.files.len(), 2);
        assert_eq!(sim.files.len(), 2);
        assert_eq!(gui.files.len(), 1);
        assert!(std::ptr::eq(syn.files[0], sim.files[0]));
    }

    #[test]
    fn test_empty_file_sets_present() {
        let c = Component::new("empty", &PackagerConfig::default());
        let sets = c.file_sets();
        assert!(sets.iter().all(|s| s.files.is_empty()));
        assert_eq!(c.display_name(), "empty_v1.0");
        assert_eq!(c.model.views.len(), 3);
        assert_eq!(c.model.views[2].model_name, None);
    }

    #[test]
    fn test_add_file_ignores_listed_name() {
        let mut c = Component::new("top", &PackagerConfig::default());
        c.add_file("src/top/pkg.vhd").unwrap();
        c.add_file("src/top/pkg.vhd").unwrap();
        c.add_file("src/top/top.vhd").unwrap();

        assert_eq!(c.files.len(), 2);
        let [syn, sim, _] = c.file_sets();
        assert_eq!(syn.files.len(), 2);
        assert_eq!(sim.files.len(), 2);
    }
}
