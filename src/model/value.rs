use std::str::FromStr;

use crate::backend::{HdlType, SerializedValue};
use crate::constants::BUSIFPARAM_VALUE_PREFIX;
use crate::error::{PackagerError, Result};

/// How the consumer should interpret the text of a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Immediate,
    User,
    Generated,
    /// Text is a statically evaluated fallback of `dependency`
    Dependent { dependency: String },
}

impl Resolution {
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Immediate => "immediate",
            Resolution::User => "user",
            Resolution::Generated => "generated",
            Resolution::Dependent { .. } => "dependent",
        }
    }

    pub fn dependency(&self) -> Option<&str> {
        match self {
            Resolution::Dependent { dependency } => Some(dependency),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Long,
    Bool,
    String,
}

impl ValueFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ValueFormat::Long => "long",
            ValueFormat::Bool => "bool",
            ValueFormat::String => "string",
        }
    }

    /// Format of a generic of the given type
    pub fn for_type(dtype: &HdlType) -> Result<Self> {
        match dtype {
            HdlType::Integer => Ok(ValueFormat::Long),
            HdlType::Bool => Ok(ValueFormat::Bool),
            HdlType::Str => Ok(ValueFormat::String),
            HdlType::Bit | HdlType::Bits { .. } => Err(PackagerError::unsupported_format(format!(
                "no parameter value format for type {:?}",
                dtype
            ))),
        }
    }

    /// Type keyword and declared width of `add_parameter`
    pub fn to_quartus(&self) -> (&str, Option<u32>) {
        match self {
            ValueFormat::Long => ("INTEGER", Some(32)),
            ValueFormat::Bool => ("BOOLEAN", Some(1)),
            ValueFormat::String => ("STRING", None),
        }
    }
}

impl FromStr for ValueFormat {
    type Err = PackagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "long" => Ok(ValueFormat::Long),
            "bool" => Ok(ValueFormat::Bool),
            "string" => Ok(ValueFormat::String),
            other => Err(PackagerError::unsupported_format(format!(
                "parameter value format '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub id: Option<String>,
    pub format: Option<ValueFormat>,
    pub resolution: Resolution,
    pub text: String,
}

impl Value {
    pub fn new(text: &str, resolution: Resolution) -> Self {
        Self {
            id: None,
            format: None,
            resolution,
            text: text.to_string(),
        }
    }

    /// Constant values keep `constant_resolution` and their evaluated text,
    /// anything else becomes `dependent` on the expression
    pub fn from_serialized(value: &SerializedValue, constant_resolution: Resolution) -> Self {
        let resolution = if value.is_constant {
            constant_resolution
        } else {
            Resolution::Dependent {
                dependency: format!("({})", value.text),
            }
        };
        Self::new(&value.evaluated, resolution)
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Parameter of a bus interface, id `BUSIFPARAM_VALUE.<INTF>.<NAME>`
    pub fn bus_param(interface_name: &str, name: &str, value: Value) -> Self {
        let id = format!(
            "{}{}.{}",
            BUSIFPARAM_VALUE_PREFIX,
            interface_name.to_uppercase(),
            name.to_uppercase()
        );
        Self::new(name, value.with_id(id))
    }

    pub fn immediate_bus_param(interface_name: &str, name: &str, text: &str) -> Self {
        Self::bus_param(interface_name, name, Value::new(text, Resolution::Immediate))
    }
}
