//! GPIO pins as resources
//!
//! Each port is a block of [`ResourceType::Gpio`] and each pin a channel in
//! it, so a pin is reserved like any other resource:
//!
//! ```
//! use psoc6_hwmgr::{devices::psoc6_01, gpio::PinId, ResourceManager};
//!
//! let hwmgr: ResourceManager<{ psoc6_01::CATALOG.bitmap_bytes() }> =
//!     ResourceManager::new(&psoc6_01::CATALOG);
//! let tx = PinId::new(5, 1);
//! hwmgr.reserve(tx.into()).unwrap();
//! assert!(hwmgr.reserve(tx.into()).is_err());
//! ```

use crate::resource::{ResourceInstance, ResourceType};

/// Port and pin number of a GPIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// Port number
    pub port: u8,
    /// Pin number within the port
    pub pin: u8,
}

impl PinId {
    /// Create a new [`PinId`]
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }

    /// The resource backing this pin.
    pub const fn resource(self) -> ResourceInstance {
        ResourceInstance::new(ResourceType::Gpio, self.port, self.pin)
    }
}

impl From<PinId> for ResourceInstance {
    fn from(pin: PinId) -> Self {
        pin.resource()
    }
}

impl TryFrom<ResourceInstance> for PinId {
    type Error = ResourceInstance;

    fn try_from(inst: ResourceInstance) -> Result<Self, Self::Error> {
        match inst.ty {
            ResourceType::Gpio => Ok(PinId::new(inst.block, inst.channel)),
            _ => Err(inst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_are_gpio_port_channels() {
        let pin = PinId::new(9, 3);
        let inst: ResourceInstance = pin.into();
        assert_eq!(inst, ResourceInstance::new(ResourceType::Gpio, 9, 3));
        assert_eq!(PinId::try_from(inst), Ok(pin));

        let scb = ResourceInstance::block(ResourceType::Scb, 9);
        assert_eq!(PinId::try_from(scb), Err(scb));
    }
}
