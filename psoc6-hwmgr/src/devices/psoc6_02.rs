//! PSoC 6 2M (CY8C62xA)

use crate::block_offsets;
use crate::catalog::{Catalog, Layout};
use crate::resource::{ClockBlock, ResourceType};

const CLOCK: &[u16] = block_offsets!(
    8,  // 8 bit dividers
    16, // 16 bit dividers
    4,  // 16.5 bit dividers
    1,  // 24.5 bit dividers
    1,  // IMO
    1,  // ECO
    1,  // EXT
    0,  // ALTHF
    1,  // ALTLF
    1,  // ILO
    1,  // PILO
    1,  // WCO
    0,  // MFO
    6,  // path muxes
    1,  // FLL
    2,  // PLL
    1,  // LF
    0,  // MF
    6,  // HF roots
    1,  // PUMP
    1,  // BAK
    1,  // ALT_SYS_TICK
    1,  // TIMER
    1,  // FAST
    1,  // PERI
    1,  // SLOW
);

/// Resource catalog of the device.
pub const CATALOG: Catalog = Catalog::builder()
    .with(ResourceType::Adc, Layout::Blocks(1))
    .with(ResourceType::Clock, Layout::Channels(CLOCK))
    .with(ResourceType::Crypto, Layout::Blocks(1))
    .with(ResourceType::Dma, Layout::Channels(block_offsets!(4)))
    .with(ResourceType::Dw, Layout::Channels(block_offsets!(29, 32)))
    .with(
        ResourceType::Gpio,
        Layout::Channels(block_offsets!(6, 6, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 2)),
    )
    .with(ResourceType::I2s, Layout::Blocks(1))
    .with(ResourceType::Lcd, Layout::Blocks(1))
    .with(ResourceType::Lpcomp, Layout::Channels(block_offsets!(2)))
    .with(ResourceType::Lptimer, Layout::Blocks(1))
    .with(ResourceType::Pdm, Layout::Blocks(1))
    .with(ResourceType::Qspi, Layout::Blocks(1))
    .with(ResourceType::Rtc, Layout::Blocks(1))
    .with(ResourceType::Scb, Layout::Blocks(13))
    .with(ResourceType::Sdhc, Layout::Blocks(2))
    .with(ResourceType::Tcpwm, Layout::Channels(block_offsets!(8, 24)))
    .with(ResourceType::Usb, Layout::Blocks(1))
    .build();

static_assertions::const_assert_eq!(
    CATALOG.block_count(ResourceType::Clock),
    ClockBlock::COUNT
);
