use serde::{Deserialize, Serialize};

/// Direction of one physical signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
            Direction::InOut => Direction::InOut,
        }
    }

    pub fn as_intf_direction(self) -> IntfDirection {
        match self {
            Direction::Out => IntfDirection::Master,
            Direction::In => IntfDirection::Slave,
            Direction::InOut => IntfDirection::Tristate,
        }
    }

    pub fn to_ipxact(&self) -> &str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }

    /// Port direction keyword of `add_interface_port`
    pub fn to_quartus(&self) -> &str {
        match self {
            Direction::In => "Input",
            Direction::Out => "Output",
            Direction::InOut => "Bidir",
        }
    }
}

/// Direction of a bus interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntfDirection {
    Master,
    Slave,
    Tristate,
}

impl IntfDirection {
    pub fn opposite(self) -> Self {
        match self {
            IntfDirection::Master => IntfDirection::Slave,
            IntfDirection::Slave => IntfDirection::Master,
            IntfDirection::Tristate => IntfDirection::Tristate,
        }
    }

    pub fn as_direction(self) -> Direction {
        match self {
            IntfDirection::Master => Direction::Out,
            IntfDirection::Slave => Direction::In,
            IntfDirection::Tristate => Direction::InOut,
        }
    }

    /// Directionality token of `add_interface`
    pub fn to_quartus(&self) -> &str {
        match self {
            IntfDirection::Master => "start",
            IntfDirection::Slave | IntfDirection::Tristate => "end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bijection() {
        for d in [Direction::In, Direction::Out, Direction::InOut] {
            assert_eq!(d.as_intf_direction().as_direction(), d);
            assert_eq!(d.opposite().as_intf_direction(), d.as_intf_direction().opposite());
        }
        assert_eq!(Direction::Out.as_intf_direction(), IntfDirection::Master);
        assert_eq!(Direction::InOut.opposite(), Direction::InOut);
    }

    #[test]
    fn test_quartus_tokens() {
        assert_eq!(IntfDirection::Master.to_quartus(), "start");
        assert_eq!(IntfDirection::Slave.to_quartus(), "end");
        assert_eq!(IntfDirection::Tristate.to_quartus(), "end");
        assert_eq!(Direction::Out.to_quartus(), "Output");
        assert_eq!(Direction::In.to_ipxact(), "in");
    }
}
