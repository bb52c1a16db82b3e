use crate::model::{Direction, Value};

/// Boundary pair of a vector port; both values use the `long` format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    pub left: Value,
    pub right: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireType {
    /// Type display name without the range, e.g. `std_logic_vector`
    pub type_name: String,
    pub vector: Option<Vector>,
}

impl WireType {
    /// Strip the range from a type display string
    pub fn display_name(serialized: &str) -> String {
        match serialized.find('(') {
            Some(i) => serialized[..i].to_string(),
            None => serialized.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub direction: Direction,
    pub wire_type: WireType,
    pub associated_clk: Option<String>,
    pub associated_rst: Option<String>,
}

impl Port {
    pub fn new(name: &str, direction: Direction, wire_type: WireType) -> Self {
        Self {
            name: name.to_string(),
            direction,
            wire_type,
            associated_clk: None,
            associated_rst: None,
        }
    }

    pub fn is_vector(&self) -> bool {
        self.wire_type.vector.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(WireType::display_name("std_logic_vector(7 DOWNTO 0)"), "std_logic_vector");
        assert_eq!(WireType::display_name("std_logic"), "std_logic");
    }
}
