//! Resource types and instances
//!
//! A [`ResourceInstance`] names one concrete piece of hardware: a resource
//! type, the block (peripheral instance) and, for channel based types, the
//! channel within that block.

/// Category of on-chip hardware tracked by the resource manager.
///
/// The order of the cataloged variants defines the order of their bit ranges
/// in the bitmap. [`ResourceType::ClockPath`] is a legacy alias with no range
/// of its own; see [`ResourceType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceType {
    /// Analog to digital converter
    Adc,
    /// Bluetooth Low Energy subsystem
    Ble,
    /// CAN FD controller
    Can,
    /// Clock sources, paths, roots and peripheral dividers
    Clock,
    /// Crypto accelerator
    Crypto,
    /// Digital to analog converter
    Dac,
    /// DMA controller (DMAC)
    Dma,
    /// DataWire DMA
    Dw,
    /// General purpose I/O, one block per port
    Gpio,
    /// I2S audio interface
    I2s,
    /// Segment LCD driver
    Lcd,
    /// Low power comparator
    Lpcomp,
    /// Low power timer (MCWDT)
    Lptimer,
    /// Opamp (continuous time block)
    Opamp,
    /// PDM to PCM converter
    Pdm,
    /// Quad SPI (SMIF)
    Qspi,
    /// Real time clock
    Rtc,
    /// Serial communication block (UART, SPI, I2C)
    Scb,
    /// SD host controller
    Sdhc,
    /// Timer, counter, PWM
    Tcpwm,
    /// Universal digital blocks
    Udb,
    /// USB device
    Usb,
    /// USB power delivery
    Usbpd,
    /// Clock path
    ///
    /// Legacy alias for channel `block` of [`ClockBlock::PathMux`] within
    /// [`ResourceType::Clock`].
    ClockPath,
}

impl ResourceType {
    /// Number of resource types that own a range in the bitmap.
    pub const COUNT: usize = 23;

    /// All resource types that own a range in the bitmap, in bitmap order.
    pub const CATALOGED: [ResourceType; ResourceType::COUNT] = [
        ResourceType::Adc,
        ResourceType::Ble,
        ResourceType::Can,
        ResourceType::Clock,
        ResourceType::Crypto,
        ResourceType::Dac,
        ResourceType::Dma,
        ResourceType::Dw,
        ResourceType::Gpio,
        ResourceType::I2s,
        ResourceType::Lcd,
        ResourceType::Lpcomp,
        ResourceType::Lptimer,
        ResourceType::Opamp,
        ResourceType::Pdm,
        ResourceType::Qspi,
        ResourceType::Rtc,
        ResourceType::Scb,
        ResourceType::Sdhc,
        ResourceType::Tcpwm,
        ResourceType::Udb,
        ResourceType::Usb,
        ResourceType::Usbpd,
    ];

    /// Position of this type in the catalog, `None` for aliases.
    pub const fn index(self) -> Option<usize> {
        match self {
            ResourceType::ClockPath => None,
            ty => Some(ty as usize),
        }
    }
}

static_assertions::const_assert_eq!(ResourceType::CATALOGED.len(), ResourceType::COUNT);
static_assertions::const_assert_eq!(ResourceType::Usbpd as usize + 1, ResourceType::COUNT);
static_assertions::const_assert_eq!(ResourceType::ClockPath as usize, ResourceType::COUNT);

/// One concrete block/channel of a resource type.
///
/// For types without channels `channel` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceInstance {
    /// Resource type
    pub ty: ResourceType,
    /// Block (peripheral instance) number
    pub block: u8,
    /// Channel number within the block
    pub channel: u8,
}

impl ResourceInstance {
    /// Create a new [`ResourceInstance`]
    pub const fn new(ty: ResourceType, block: u8, channel: u8) -> Self {
        Self { ty, block, channel }
    }

    /// Instance of a type without channels.
    pub const fn block(ty: ResourceType, block: u8) -> Self {
        Self::new(ty, block, 0)
    }
}

/// Blocks of [`ResourceType::Clock`].
///
/// The four peripheral divider kinds come first; each has one channel per
/// hardware divider. The remaining blocks model the clock tree, with one
/// channel per instance (e.g. one per clock path or high frequency root).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockBlock {
    /// 8 bit integer peripheral dividers
    Peripheral8Bit,
    /// 16 bit integer peripheral dividers
    Peripheral16Bit,
    /// 16.5 bit fractional peripheral dividers
    Peripheral16_5Bit,
    /// 24.5 bit fractional peripheral dividers
    Peripheral24_5Bit,
    /// Internal main oscillator
    Imo,
    /// External crystal oscillator
    Eco,
    /// External clock input
    Ext,
    /// Alternate high frequency clock
    AltHf,
    /// Alternate low frequency clock
    AltLf,
    /// Internal low speed oscillator
    Ilo,
    /// Precision internal low speed oscillator
    Pilo,
    /// Watch crystal oscillator
    Wco,
    /// Medium frequency oscillator
    Mfo,
    /// Clock path input multiplexers
    PathMux,
    /// Frequency locked loop
    Fll,
    /// Phase locked loops
    Pll,
    /// Low frequency clock
    Lf,
    /// Medium frequency clock
    Mf,
    /// High frequency clock roots
    Hf,
    /// Analog pump clock
    Pump,
    /// Backup domain clock
    Bak,
    /// SysTick alternate clock
    AltSysTick,
    /// Timer clock
    Timer,
    /// CM4 fast clock
    Fast,
    /// Peripheral clock
    Peri,
    /// CM0+ slow clock
    Slow,
}

impl ClockBlock {
    /// Number of clock blocks.
    pub const COUNT: usize = 26;
}

static_assertions::const_assert_eq!(ClockBlock::Slow as usize + 1, ClockBlock::COUNT);

/// Peripheral clock divider kinds, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DividerType {
    /// 8 bit integer divider
    Div8,
    /// 16 bit integer divider
    Div16,
    /// 16.5 bit fractional divider
    Div16_5,
    /// 24.5 bit fractional divider
    Div24_5,
}

impl DividerType {
    /// All divider kinds, narrowest first.
    pub const ALL: [DividerType; 4] = [
        DividerType::Div8,
        DividerType::Div16,
        DividerType::Div16_5,
        DividerType::Div24_5,
    ];

    /// The clock block holding dividers of this kind.
    pub const fn block(self) -> ClockBlock {
        match self {
            DividerType::Div8 => ClockBlock::Peripheral8Bit,
            DividerType::Div16 => ClockBlock::Peripheral16Bit,
            DividerType::Div16_5 => ClockBlock::Peripheral16_5Bit,
            DividerType::Div24_5 => ClockBlock::Peripheral24_5Bit,
        }
    }
}
