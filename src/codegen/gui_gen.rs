use crate::backend::DesignSnapshot;
use crate::constants::{COMPONENT_NAME_PARAM, MODELPARAM_VALUE_PREFIX, PARAM_VALUE_PREFIX};

/// Generate the Vivado customization GUI script (`xgui/gui.tcl`): one page
/// with a widget per generic, plus the update/validate procs Vivado expects
/// for every parameter
pub struct GuiTclGenerator {
    indent: String,
}

impl GuiTclGenerator {
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }

    pub fn generate(&self, design: &DesignSnapshot) -> String {
        let mut output = String::new();

        output.push_str("# Definitional proc to organize widgets for parameters.\n");
        output.push_str("proc init_gui { IPINST } {\n");
        output.push_str(&format!(
            "{}ipgui::add_param $IPINST -name \"{}\"\n",
            self.indent, COMPONENT_NAME_PARAM
        ));
        output.push_str(&format!("{}#Adding Page\n", self.indent));
        output.push_str(&format!(
            "{}set Main [ipgui::add_page $IPINST -name \"Main\"]\n",
            self.indent
        ));
        for param in &design.params {
            output.push_str(&format!(
                "{}ipgui::add_param $IPINST -name \"{}\" -parent ${{Main}}\n",
                self.indent, param.name
            ));
        }
        output.push_str("}\n");

        for param in &design.params {
            output.push_str("\n\n");
            output.push_str(&self.param_procs(&param.name));
        }

        output
    }

    fn param_procs(&self, name: &str) -> String {
        let param = format!("{}{}", PARAM_VALUE_PREFIX, name);
        let model_param = format!("{}{}", MODELPARAM_VALUE_PREFIX, name);
        let mut output = String::new();

        output.push_str(&format!("proc update_{0} {{ {0} }} {{\n", param));
        output.push_str(&format!(
            "{}# Procedure called to update {} when any of the dependent parameters in the arguments change\n",
            self.indent, name
        ));
        output.push_str("}\n\n");

        output.push_str(&format!("proc validate_{0} {{ {0} }} {{\n", param));
        output.push_str(&format!("{}# Procedure called to validate {}\n", self.indent, name));
        output.push_str(&format!("{}return true\n", self.indent));
        output.push_str("}\n\n");

        output.push_str(&format!("proc update_{0} {{ {0} {1} }} {{\n", model_param, param));
        output.push_str(&format!(
            "{}# Procedure called to set VHDL generic/Verilog parameter value(s) based on TCL parameter value\n",
            self.indent
        ));
        output.push_str(&format!(
            "{}set_property value [get_property value ${{{}}}] ${{{}}}\n",
            self.indent, param, model_param
        ));
        output.push_str("}\n");

        output
    }
}

impl Default for GuiTclGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Expr, HdlParam, HdlType};

    #[test]
    fn test_gui_without_generics() {
        let tcl = GuiTclGenerator::new().generate(&DesignSnapshot::new("top"));
        assert!(tcl.contains("ipgui::add_param $IPINST -name \"Component_Name\"\n"));
        assert!(tcl.contains("set Main [ipgui::add_page $IPINST -name \"Main\"]"));
        assert!(!tcl.contains("proc update_"));
    }

    #[test]
    fn test_gui_param_procs() {
        let mut design = DesignSnapshot::new("top");
        design.add_param(HdlParam::new("WIDTH", HdlType::Integer, Expr::Int(8)));
        let tcl = GuiTclGenerator::new().generate(&design);

        assert!(tcl.contains("ipgui::add_param $IPINST -name \"WIDTH\" -parent ${Main}\n"));
        assert!(tcl.contains("proc update_PARAM_VALUE.WIDTH { PARAM_VALUE.WIDTH } {\n"));
        assert!(tcl.contains("proc validate_PARAM_VALUE.WIDTH { PARAM_VALUE.WIDTH } {\n  # Procedure called to validate WIDTH\n  return true\n}"));
        assert!(tcl.contains(
            "proc update_MODELPARAM_VALUE.WIDTH { MODELPARAM_VALUE.WIDTH PARAM_VALUE.WIDTH } {\n"
        ));
        assert!(tcl.contains(
            "set_property value [get_property value ${PARAM_VALUE.WIDTH}] ${MODELPARAM_VALUE.WIDTH}\n"
        ));
    }
}
