use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::constants::{NS_SPIRIT, NS_XILINX, NS_XSI, WIRE_VIEW_NAME_REFS};
use crate::error::{PackagerError, Result};
use crate::model::{
    BusInterface, Component, FileSet, IntfDirection, Model, Parameter, Port, Value, Vlnv,
};
use crate::utils::Clock;

/// Generate IP-XACT (`component.xml`) from a resolved Component.
///
/// Element order is fixed; Vivado rejects documents where it differs.
pub struct IpXactGenerator<'a> {
    clock: &'a dyn Clock,
}

type XmlWriter<'w> = Writer<&'w mut Cursor<Vec<u8>>>;

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| PackagerError::xml(format!("Write error: {e}")))
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn text_elem<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start(writer, name)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn vlnv_elem<W: Write>(writer: &mut Writer<W>, name: &str, vlnv: &Vlnv) -> Result<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("spirit:vendor", vlnv.vendor.as_str()));
    elem.push_attribute(("spirit:library", vlnv.library.as_str()));
    elem.push_attribute(("spirit:name", vlnv.name.as_str()));
    elem.push_attribute(("spirit:version", vlnv.version.as_str()));
    write(writer, Event::Empty(elem))
}

fn value_elem<W: Write>(writer: &mut Writer<W>, name: &str, value: &Value) -> Result<()> {
    let mut elem = BytesStart::new(name);
    if let Some(id) = &value.id {
        elem.push_attribute(("spirit:id", id.as_str()));
    }
    if let Some(format) = &value.format {
        elem.push_attribute(("spirit:format", format.as_str()));
    }
    elem.push_attribute(("spirit:resolve", value.resolution.as_str()));
    if let Some(dependency) = value.resolution.dependency() {
        elem.push_attribute(("spirit:dependency", dependency));
    }
    write(writer, Event::Start(elem))?;
    write(writer, Event::Text(BytesText::new(&value.text)))?;
    end(writer, name)
}

fn parameters_elem<W: Write>(writer: &mut Writer<W>, parameters: &[Parameter]) -> Result<()> {
    start(writer, "spirit:parameters")?;
    for p in parameters {
        start(writer, "spirit:parameter")?;
        text_elem(writer, "spirit:name", &p.name)?;
        value_elem(writer, "spirit:value", &p.value)?;
        end(writer, "spirit:parameter")?;
    }
    end(writer, "spirit:parameters")
}

impl<'a> IpXactGenerator<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn generate(&self, component: &Component) -> Result<String> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;

        let mut root = BytesStart::new("spirit:component");
        root.push_attribute(("xmlns:xilinx", NS_XILINX));
        root.push_attribute(("xmlns:spirit", NS_SPIRIT));
        root.push_attribute(("xmlns:xsi", NS_XSI));
        write(&mut writer, Event::Start(root))?;

        text_elem(&mut writer, "spirit:vendor", &component.vendor)?;
        text_elem(&mut writer, "spirit:library", &component.library)?;
        text_elem(&mut writer, "spirit:name", &component.name)?;
        text_elem(&mut writer, "spirit:version", &component.version)?;

        if !component.bus_interfaces.is_empty() {
            start(&mut writer, "spirit:busInterfaces")?;
            for bi in &component.bus_interfaces {
                self.write_bus_interface(&mut writer, bi)?;
            }
            end(&mut writer, "spirit:busInterfaces")?;
        }

        self.write_model(&mut writer, &component.model)?;

        start(&mut writer, "spirit:fileSets")?;
        for fs in component.file_sets() {
            self.write_file_set(&mut writer, &fs)?;
        }
        end(&mut writer, "spirit:fileSets")?;

        text_elem(&mut writer, "spirit:description", &component.description)?;
        parameters_elem(&mut writer, &component.parameters)?;
        self.write_vendor_extensions(&mut writer, component)?;

        end(&mut writer, "spirit:component")?;

        let mut output = buffer.into_inner();
        output.push(b'\n');
        String::from_utf8(output).map_err(|e| PackagerError::xml(format!("Invalid UTF-8: {e}")))
    }

    fn write_bus_interface(&self, writer: &mut XmlWriter<'_>, bi: &BusInterface) -> Result<()> {
        start(writer, "spirit:busInterface")?;
        text_elem(writer, "spirit:name", &bi.name)?;
        vlnv_elem(writer, "spirit:busType", &bi.bus_type)?;
        vlnv_elem(writer, "spirit:abstractionType", &bi.abstraction_type)?;

        let mode = match bi.direction {
            IntfDirection::Master => "spirit:master",
            IntfDirection::Slave | IntfDirection::Tristate => "spirit:slave",
        };
        write(writer, Event::Empty(BytesStart::new(mode)))?;

        start(writer, "spirit:portMaps")?;
        for pm in &bi.port_maps {
            start(writer, "spirit:portMap")?;
            start(writer, "spirit:logicalPort")?;
            text_elem(writer, "spirit:name", &pm.logical)?;
            end(writer, "spirit:logicalPort")?;
            start(writer, "spirit:physicalPort")?;
            text_elem(writer, "spirit:name", &pm.physical)?;
            end(writer, "spirit:physicalPort")?;
            end(writer, "spirit:portMap")?;
        }
        end(writer, "spirit:portMaps")?;

        if !bi.parameters.is_empty() {
            parameters_elem(writer, &bi.parameters)?;
        }
        end(writer, "spirit:busInterface")
    }

    fn write_model(&self, writer: &mut XmlWriter<'_>, model: &Model) -> Result<()> {
        start(writer, "spirit:model")?;

        start(writer, "spirit:views")?;
        for view in &model.views {
            start(writer, "spirit:view")?;
            text_elem(writer, "spirit:name", &view.name)?;
            text_elem(writer, "spirit:displayName", &view.display_name)?;
            text_elem(writer, "spirit:envIdentifier", &view.env_identifier)?;
            if let Some(model_name) = &view.model_name {
                text_elem(writer, "spirit:modelName", model_name)?;
            }
            start(writer, "spirit:fileSetRef")?;
            text_elem(writer, "spirit:localName", view.file_set_ref)?;
            end(writer, "spirit:fileSetRef")?;
            end(writer, "spirit:view")?;
        }
        end(writer, "spirit:views")?;

        if !model.ports.is_empty() {
            start(writer, "spirit:ports")?;
            for port in &model.ports {
                self.write_port(writer, port)?;
            }
            end(writer, "spirit:ports")?;
        }

        if !model.model_parameters.is_empty() {
            start(writer, "spirit:modelParameters")?;
            for mp in &model.model_parameters {
                let mut elem = BytesStart::new("spirit:modelParameter");
                elem.push_attribute(("spirit:dataType", mp.data_type.as_str()));
                write(writer, Event::Start(elem))?;
                text_elem(writer, "spirit:name", &mp.name)?;
                text_elem(writer, "spirit:displayName", &mp.display_name)?;
                value_elem(writer, "spirit:value", &mp.value)?;
                end(writer, "spirit:modelParameter")?;
            }
            end(writer, "spirit:modelParameters")?;
        }

        end(writer, "spirit:model")
    }

    fn write_port(&self, writer: &mut XmlWriter<'_>, port: &Port) -> Result<()> {
        start(writer, "spirit:port")?;
        text_elem(writer, "spirit:name", &port.name)?;
        start(writer, "spirit:wire")?;
        text_elem(writer, "spirit:direction", port.direction.to_ipxact())?;
        if let Some(vector) = &port.wire_type.vector {
            start(writer, "spirit:vector")?;
            value_elem(writer, "spirit:left", &vector.left)?;
            value_elem(writer, "spirit:right", &vector.right)?;
            end(writer, "spirit:vector")?;
        }
        start(writer, "spirit:wireTypeDefs")?;
        start(writer, "spirit:wireTypeDef")?;
        text_elem(writer, "spirit:typeName", &port.wire_type.type_name)?;
        for view in WIRE_VIEW_NAME_REFS {
            text_elem(writer, "spirit:viewNameRef", view)?;
        }
        end(writer, "spirit:wireTypeDef")?;
        end(writer, "spirit:wireTypeDefs")?;
        end(writer, "spirit:wire")?;
        end(writer, "spirit:port")
    }

    fn write_file_set(&self, writer: &mut XmlWriter<'_>, fs: &FileSet<'_>) -> Result<()> {
        start(writer, "spirit:fileSet")?;
        text_elem(writer, "spirit:name", fs.name)?;
        for file in &fs.files {
            start(writer, "spirit:file")?;
            text_elem(writer, "spirit:name", &file.name)?;
            if let Some(file_type) = file.kind.file_type() {
                text_elem(writer, "spirit:fileType", file_type)?;
            }
            text_elem(writer, "spirit:userFileType", file.kind.user_file_type())?;
            end(writer, "spirit:file")?;
        }
        end(writer, "spirit:fileSet")
    }

    fn write_vendor_extensions(&self, writer: &mut XmlWriter<'_>, component: &Component) -> Result<()> {
        let ext = &component.vendor_extensions;
        let now = self.clock.now();

        start(writer, "spirit:vendorExtensions")?;
        start(writer, "xilinx:coreExtensions")?;

        start(writer, "xilinx:supportedFamilies")?;
        for family in &ext.supported_families {
            let mut elem = BytesStart::new("xilinx:family");
            elem.push_attribute(("xilinx:lifeCycle", family.life_cycle.as_str()));
            write(writer, Event::Start(elem))?;
            write(writer, Event::Text(BytesText::new(&family.family)))?;
            end(writer, "xilinx:family")?;
        }
        end(writer, "xilinx:supportedFamilies")?;

        start(writer, "xilinx:taxonomies")?;
        for taxonomy in &ext.taxonomies {
            text_elem(writer, "xilinx:taxonomy", taxonomy)?;
        }
        end(writer, "xilinx:taxonomies")?;

        text_elem(writer, "xilinx:displayName", &component.display_name())?;
        text_elem(writer, "xilinx:coreRevision", &now.timestamp().to_string())?;
        text_elem(
            writer,
            "xilinx:coreCreationDateTime",
            &now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        )?;
        end(writer, "xilinx:coreExtensions")?;

        start(writer, "xilinx:packagingInfo")?;
        text_elem(writer, "xilinx:xilinxVersion", &ext.xilinx_version)?;
        end(writer, "xilinx:packagingInfo")?;

        end(writer, "spirit:vendorExtensions")
    }
}
