use crate::error::{PackagerError, Result};
use crate::model::{BusInterface, Component, Parameter};
use crate::utils::{tcl_bool, tcl_quote};

/// Generate the Quartus Platform Designer script (`component_hw.tcl`)
pub struct QuartusTclGenerator {
    version: String,
}

impl QuartusTclGenerator {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
        }
    }

    pub fn generate(&self, component: &Component) -> Result<String> {
        let mut lines = Vec::new();

        lines.push("# module properties".to_string());
        lines.push(format!("package require -exact qsys {}", self.version));
        let name = component.name.as_str();
        let properties = [
            ("DESCRIPTION", tcl_quote(&component.description)),
            ("NAME", tcl_quote(name)),
            ("VERSION", tcl_quote(&component.version)),
            ("INTERNAL", tcl_bool(false).to_string()),
            ("OPAQUE_ADDRESS_MAP", tcl_bool(true).to_string()),
            ("GROUP", tcl_quote(&component.library)),
            ("AUTHOR", tcl_quote(&component.vendor)),
            ("DISPLAY_NAME", tcl_quote(name)),
            ("INSTANTIATE_IN_SYSTEM_MODULE", tcl_bool(true).to_string()),
            ("EDITABLE", tcl_bool(true).to_string()),
            ("REPORT_TO_TALKBACK", tcl_bool(false).to_string()),
            ("ALLOW_GREYBOX_GENERATION", tcl_bool(false).to_string()),
            ("REPORT_HIERARCHY", tcl_bool(false).to_string()),
        ];
        for (property, value) in properties {
            lines.push(format!("set_module_property {} {}", property, value));
        }

        lines.push("add_fileset QUARTUS_SYNTH QUARTUS_SYNTH \"\" \"\"".to_string());
        lines.push(format!("set_fileset_property QUARTUS_SYNTH TOP_LEVEL {}", name));
        lines.push("set_fileset_property QUARTUS_SYNTH ENABLE_RELATIVE_INCLUDE_PATHS false".to_string());
        lines.push("set_fileset_property QUARTUS_SYNTH ENABLE_FILE_OVERWRITE_MODE false".to_string());
        for file in &component.files {
            if let Some(file_type) = file.kind.to_quartus() {
                lines.push(format!(
                    "add_fileset_file {} {} PATH {}",
                    file.base_name(),
                    file_type,
                    file.name
                ));
            }
        }

        lines.push("# params".to_string());
        // The first parameter is the component name
        for param in component.parameters.iter().skip(1) {
            self.add_parameter(&mut lines, param)?;
        }

        lines.push("# interfaces".to_string());
        for bi in &component.bus_interfaces {
            self.add_interface(&mut lines, bi);
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }

    fn add_parameter(&self, lines: &mut Vec<String>, param: &Parameter) -> Result<()> {
        let name = &param.name;
        let format = param.value.format.ok_or_else(|| {
            PackagerError::unsupported_format(format!("parameter {} has no value format", name))
        })?;
        let (tcl_type, width) = format.to_quartus();
        match width {
            Some(width) => lines.push(format!("add_parameter {} {} {}", name, tcl_type, width)),
            None => lines.push(format!("add_parameter {} {}", name, tcl_type)),
        }
        lines.push(format!("set_parameter_property {} DEFAULT_VALUE {}", name, param.value.text));
        lines.push(format!("set_parameter_property {} DISPLAY_NAME {}", name, name));
        lines.push(format!("set_parameter_property {} TYPE {}", name, tcl_type));
        lines.push(format!("set_parameter_property {} UNITS None", name));
        lines.push(format!("set_parameter_property {} HDL_PARAMETER true", name));
        Ok(())
    }

    fn add_interface(&self, lines: &mut Vec<String>, bi: &BusInterface) {
        let name = &bi.name;
        lines.push(format!(
            "add_interface {} {} {}",
            name,
            bi.quartus_type,
            bi.direction.to_quartus()
        ));

        let property = |prop: &str, value: &str| format!("set_interface_property {} {} {}", name, prop, value);
        lines.push(property("ENABLED", tcl_bool(true)));
        lines.push(property("EXPORT_OF", &tcl_quote("")));
        lines.push(property("PORT_NAME_MAP", &tcl_quote("")));
        lines.push(property("CMSIS_SVD_VARIABLES", &tcl_quote("")));
        lines.push(property("SVD_ADDRESS_GROUP", &tcl_quote("")));
        if let Some(clk) = &bi.associated_clk {
            lines.push(property("associatedClock", clk));
        }
        if let Some(rst) = &bi.associated_rst {
            lines.push(property("associatedReset", rst));
        }

        for pm in &bi.port_maps {
            lines.push(format!(
                "add_interface_port {} {} {} {} {}",
                name,
                pm.physical,
                pm.quartus_logical,
                pm.direction.to_quartus(),
                pm.width
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackagerConfig;
    use crate::model::{IntfDirection, PortMap, Resolution, Value, ValueFormat, Vlnv};

    fn component() -> Component {
        let mut c = Component::new("adder8", &PackagerConfig::default());
        c.vendor = "hwt".to_string();
        c.library = "mylib".to_string();
        c.description = "adder8_v1.0".to_string();
        c.add_file("src/adder8/adder8.vhd").unwrap();
        c.add_file("src/adder8/pkg.v").unwrap();
        c.add_file("xgui/gui.tcl").unwrap();
        c.parameters.push(Parameter::new("Component_Name", Value::new("adder8", Resolution::User)));
        c.parameters.push(Parameter::new(
            "WIDTH",
            Value::new("8", Resolution::User).with_format(ValueFormat::Long),
        ));
        c.parameters.push(Parameter::new(
            "USE_LAST",
            Value::new("true", Resolution::User).with_format(ValueFormat::Bool),
        ));
        c
    }

    fn stream(name: &str, direction: IntfDirection) -> BusInterface {
        let mut bi = BusInterface::new(
            name,
            Vlnv::new("xilinx.com", "interface", "axis", "1.0"),
            "axi4stream",
            direction,
        );
        for (physical, logical, dir, width) in [
            ("data", "tdata", direction.as_direction(), "8"),
            ("valid", "tvalid", direction.as_direction(), "1"),
            ("ready", "tready", direction.as_direction().opposite(), "1"),
        ] {
            bi.port_maps.push(PortMap {
                physical: format!("{}_{}", name, physical),
                logical: logical.to_uppercase(),
                quartus_logical: logical.to_string(),
                direction: dir,
                width: width.to_string(),
            });
        }
        bi.associated_clk = Some("clk".to_string());
        bi
    }

    #[test]
    fn test_module_properties_and_files() {
        let tcl = QuartusTclGenerator::new("16.1").generate(&component()).unwrap();
        let lines: Vec<&str> = tcl.lines().collect();

        assert_eq!(lines[0], "# module properties");
        assert_eq!(lines[1], "package require -exact qsys 16.1");
        assert_eq!(lines[2], "set_module_property DESCRIPTION \"adder8_v1.0\"");
        assert_eq!(lines[4], "set_module_property VERSION \"1.0\"");
        assert_eq!(lines[5], "set_module_property INTERNAL false");
        assert!(tcl.contains("add_fileset_file adder8.vhd VHDL PATH src/adder8/adder8.vhd\n"));
        assert!(tcl.contains("add_fileset_file pkg.v VERILOG PATH src/adder8/pkg.v\n"));
        assert!(!tcl.contains("gui.tcl"));
    }

    #[test]
    fn test_parameters_skip_component_name() {
        let tcl = QuartusTclGenerator::new("16.1").generate(&component()).unwrap();

        assert!(!tcl.contains("add_parameter Component_Name"));
        assert!(tcl.contains("add_parameter WIDTH INTEGER 32\nset_parameter_property WIDTH DEFAULT_VALUE 8\n"));
        assert!(tcl.contains("add_parameter USE_LAST BOOLEAN 1\nset_parameter_property USE_LAST DEFAULT_VALUE true\n"));
        assert!(tcl.contains("set_parameter_property USE_LAST HDL_PARAMETER true"));
    }

    #[test]
    fn test_interface_blocks() {
        let mut c = component();
        c.bus_interfaces.push(stream("m_axis", IntfDirection::Master));
        c.bus_interfaces.push(stream("s_axis", IntfDirection::Slave));
        let tcl = QuartusTclGenerator::new("16.1").generate(&c).unwrap();

        assert!(tcl.contains("add_interface m_axis axi4stream start\n"));
        assert!(tcl.contains("add_interface s_axis axi4stream end\n"));
        assert!(tcl.contains("set_interface_property m_axis EXPORT_OF \"\"\n"));
        assert!(tcl.contains(
            "set_interface_property m_axis SVD_ADDRESS_GROUP \"\"\nset_interface_property m_axis associatedClock clk\n"
        ));
        assert!(tcl.contains("add_interface_port m_axis m_axis_ready tready Input 1\n"));
        assert!(tcl.contains("add_interface_port s_axis s_axis_data tdata Input 8\n"));
        assert_eq!(tcl.matches("add_interface_port m_axis ").count(), 3);
        assert!(tcl.ends_with("add_interface_port s_axis s_axis_ready tready Output 1\n"));
    }

    #[test]
    fn test_parameter_without_format_fails() {
        let mut c = component();
        c.parameters.push(Parameter::new("RAW", Value::new("x", Resolution::User)));
        assert!(matches!(
            QuartusTclGenerator::new("16.1").generate(&c),
            Err(PackagerError::UnsupportedFormat(_))
        ));
    }
}
