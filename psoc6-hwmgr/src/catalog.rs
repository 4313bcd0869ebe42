//! Resource catalog
//!
//! The catalog describes, for one device, how many blocks and channels every
//! [`ResourceType`] has and where each type's bits live in the bitmap. Types
//! are laid out back to back in [`ResourceType::CATALOGED`] order, so type
//! `k` starts right after the last bit of type `k - 1`.
//!
//! Catalogs are meant to be built in a `const` item, which turns every
//! consistency problem into a compile time error:
//!
//! ```
//! use psoc6_hwmgr::{block_offsets, Catalog, Layout, ResourceType};
//!
//! const CATALOG: Catalog = Catalog::builder()
//!     .with(ResourceType::Scb, Layout::Blocks(4))
//!     // Two ports with 8 and 3 pins
//!     .with(ResourceType::Gpio, Layout::Channels(block_offsets!(8, 3)))
//!     .build();
//!
//! assert_eq!(CATALOG.bit_count(), 15);
//! ```

use crate::error::Error;
use crate::resource::{ClockBlock, ResourceInstance, ResourceType};

/// Builds a block offset table from per-block channel counts.
///
/// `block_offsets!(3, 2)` expands to `&[0, 3, 5]`: entry `b` is the offset
/// of the first channel of block `b`, the last entry is the total channel
/// count.
#[macro_export]
macro_rules! block_offsets {
    (@acc [$($out:expr),*] $sum:expr; $head:expr $(, $tail:expr)*) => {
        $crate::block_offsets!(@acc [$($out,)* $sum + $head] $sum + $head; $($tail),*)
    };
    (@acc [$($out:expr),*] $sum:expr;) => {
        &[$($out),*]
    };
    ($($channels:expr),* $(,)?) => {
        $crate::block_offsets!(@acc [0u16] 0u16; $($channels),*)
    };
}

/// How the bits of one resource type are organised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `n` blocks without channels, one bit each.
    ///
    /// `Blocks(0)` marks a type the device does not have.
    Blocks(u16),
    /// Blocks with channels, given as a cumulative block offset table (see
    /// [`block_offsets!`]).
    ///
    /// The table has one entry more than there are blocks and starts at 0.
    /// Blocks may have different channel counts, including zero.
    Channels(&'static [u16]),
}

impl Layout {
    /// Number of bits this layout occupies.
    ///
    /// An empty offset table counts as a type without blocks.
    pub const fn width(&self) -> u16 {
        match self {
            Layout::Blocks(n) => *n,
            Layout::Channels(offsets) => match offsets.last() {
                Some(width) => *width,
                None => 0,
            },
        }
    }

    /// Number of blocks.
    pub const fn blocks(&self) -> usize {
        match self {
            Layout::Blocks(n) => *n as usize,
            Layout::Channels(offsets) => offsets.len().saturating_sub(1),
        }
    }

    const fn check(&self) {
        match self {
            Layout::Blocks(n) => assert!(*n <= 256, "more than 256 blocks"),
            Layout::Channels(offsets) => {
                assert!(!offsets.is_empty(), "empty block offset table");
                assert!(offsets[0] == 0, "block offset table must start at 0");
                assert!(offsets.len() <= 257, "more than 256 blocks");
                let mut i = 1;
                while i < offsets.len() {
                    assert!(offsets[i] >= offsets[i - 1], "block offsets must not decrease");
                    assert!(
                        offsets[i] - offsets[i - 1] <= 256,
                        "more than 256 channels in a block"
                    );
                    i += 1;
                }
            }
        }
    }
}

/// Builder for a [`Catalog`], see [`Catalog::builder`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogBuilder {
    layouts: [Layout; ResourceType::COUNT],
}

impl CatalogBuilder {
    /// Set the layout of `ty`.
    ///
    /// Panics (at compile time when used in a `const`) on an alias type or a
    /// malformed layout.
    pub const fn with(mut self, ty: ResourceType, layout: Layout) -> Self {
        let idx = match ty.index() {
            Some(idx) => idx,
            None => panic!("alias types have no layout of their own"),
        };
        layout.check();
        self.layouts[idx] = layout;
        self
    }

    /// Compute the bit offsets and finish the catalog.
    pub const fn build(self) -> Catalog {
        let mut base = [0u16; ResourceType::COUNT + 1];
        let mut total: u32 = 0;
        let mut i = 0;
        while i < ResourceType::COUNT {
            base[i] = total as u16;
            total += self.layouts[i].width() as u32;
            assert!(total <= u16::MAX as u32, "catalog exceeds 65535 bits");
            i += 1;
        }
        base[ResourceType::COUNT] = total as u16;
        Catalog {
            layouts: self.layouts,
            base,
        }
    }
}

/// Per-device description of all trackable resources.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    layouts: [Layout; ResourceType::COUNT],
    base: [u16; ResourceType::COUNT + 1],
}

impl Catalog {
    /// Start a catalog in which every type is absent.
    pub const fn builder() -> CatalogBuilder {
        CatalogBuilder {
            layouts: [Layout::Blocks(0); ResourceType::COUNT],
        }
    }

    /// Total number of bits.
    pub const fn bit_count(&self) -> usize {
        self.base[ResourceType::COUNT] as usize
    }

    /// Number of bytes a bitmap for this catalog needs.
    pub const fn bitmap_bytes(&self) -> usize {
        self.bit_count().div_ceil(8)
    }

    /// Layout of `ty`.
    ///
    /// The legacy [`ResourceType::ClockPath`] has one block per clock path
    /// and no channels.
    pub const fn layout(&self, ty: ResourceType) -> Layout {
        match ty.index() {
            Some(idx) => self.layouts[idx],
            None => {
                let paths = self.clock_paths();
                Layout::Blocks(paths.end - paths.start)
            }
        }
    }

    /// Whether `ty` is addressed by block and channel.
    pub const fn uses_channels(&self, ty: ResourceType) -> bool {
        matches!(self.layout(ty), Layout::Channels(_))
    }

    /// First bit of `ty`.
    pub const fn base_offset(&self, ty: ResourceType) -> u16 {
        self.bit_range(ty).start
    }

    /// Bits owned by `ty`. Empty for types the device does not have.
    ///
    /// For [`ResourceType::ClockPath`] this is the path mux part of the clock
    /// range.
    pub const fn bit_range(&self, ty: ResourceType) -> core::ops::Range<u16> {
        match ty.index() {
            Some(idx) => self.base[idx]..self.base[idx + 1],
            None => self.clock_paths(),
        }
    }

    /// Bits of the [`ClockBlock::PathMux`] block.
    const fn clock_paths(&self) -> core::ops::Range<u16> {
        let idx = ResourceType::Clock as usize;
        let base = self.base[idx];
        let block = ClockBlock::PathMux as usize;
        match self.layouts[idx] {
            Layout::Channels(offsets) if block + 1 < offsets.len() => {
                base + offsets[block]..base + offsets[block + 1]
            }
            Layout::Blocks(n) if block < n as usize => {
                base + block as u16..base + block as u16 + 1
            }
            _ => base..base,
        }
    }

    /// Number of blocks of `ty`.
    pub const fn block_count(&self, ty: ResourceType) -> usize {
        self.layout(ty).blocks()
    }

    /// Number of channels in `block` of `ty`, `None` if there is no such
    /// block. Types without channels report 1 for every block.
    pub const fn channel_count(&self, ty: ResourceType, block: u8) -> Option<u16> {
        let block = block as usize;
        match self.layout(ty) {
            Layout::Blocks(n) if block < n as usize => Some(1),
            Layout::Blocks(_) => None,
            Layout::Channels(offsets) if block + 1 < offsets.len() => {
                Some(offsets[block + 1] - offsets[block])
            }
            Layout::Channels(_) => None,
        }
    }

    /// Map a resource to its bit in the bitmap.
    ///
    /// Fails with [`Error::InvalidResource`] when the block or channel lies
    /// outside the catalog, including a non-zero channel on a type without
    /// channels.
    pub fn bit_position(&self, inst: ResourceInstance) -> Result<u16, Error> {
        if inst.ty == ResourceType::ClockPath && inst.channel != 0 {
            return Err(Error::InvalidResource);
        }
        let inst = resolve_alias_instance(inst);
        let idx = inst.ty as usize;
        let base = u32::from(self.base[idx]);
        let block = usize::from(inst.block);
        let (bit, end) = match self.layouts[idx] {
            Layout::Channels(offsets) => {
                if block + 1 >= offsets.len() {
                    return Err(Error::InvalidResource);
                }
                (
                    base + u32::from(offsets[block]) + u32::from(inst.channel),
                    base + u32::from(offsets[block + 1]),
                )
            }
            Layout::Blocks(_) => {
                if inst.channel != 0 {
                    return Err(Error::InvalidResource);
                }
                (base + block as u32, u32::from(self.base[idx + 1]))
            }
        };
        if bit < end {
            Ok(bit as u16)
        } else {
            Err(Error::InvalidResource)
        }
    }

    /// The resource owning `bit`, if any.
    pub fn resource_at(&self, bit: u16) -> Option<ResourceInstance> {
        let idx = (0..ResourceType::COUNT).find(|&i| self.base[i] <= bit && bit < self.base[i + 1])?;
        let ty = ResourceType::CATALOGED[idx];
        let rel = bit - self.base[idx];
        match self.layouts[idx] {
            Layout::Blocks(_) => Some(ResourceInstance::block(ty, rel as u8)),
            Layout::Channels(offsets) => {
                let block = offsets.windows(2).position(|w| w[0] <= rel && rel < w[1])?;
                Some(ResourceInstance::new(
                    ty,
                    block as u8,
                    (rel - offsets[block]) as u8,
                ))
            }
        }
    }

    /// All resources of `ty`, in ascending bit order.
    ///
    /// For channel based types this walks every channel of block 0, then
    /// every channel of block 1 and so on. The legacy
    /// [`ResourceType::ClockPath`] yields one instance per clock path.
    pub fn instances(&self, ty: ResourceType) -> Instances<'_> {
        Instances {
            catalog: self,
            ty,
            block: 0,
            block_end: self.block_count(ty),
            channel: 0,
        }
    }

    /// All resources in `block` of `ty`, in ascending bit order.
    pub fn block_instances(&self, ty: ResourceType, block: u8) -> Instances<'_> {
        let block = usize::from(block);
        Instances {
            catalog: self,
            ty,
            block,
            block_end: self.block_count(ty).min(block + 1),
            channel: 0,
        }
    }
}

/// Iterator over resources of one type, see [`Catalog::instances`].
#[derive(Debug, Clone)]
pub struct Instances<'a> {
    catalog: &'a Catalog,
    ty: ResourceType,
    block: usize,
    block_end: usize,
    channel: u16,
}

impl Iterator for Instances<'_> {
    type Item = ResourceInstance;

    fn next(&mut self) -> Option<ResourceInstance> {
        while self.block < self.block_end {
            let width = self.catalog.channel_count(self.ty, self.block as u8)?;
            if self.channel < width {
                let channel = self.channel as u8;
                self.channel += 1;
                return Some(ResourceInstance::new(self.ty, self.block as u8, channel));
            }
            self.block += 1;
            self.channel = 0;
        }
        None
    }
}

/// Clock paths are channels of the path mux block.
const fn resolve_alias_instance(inst: ResourceInstance) -> ResourceInstance {
    match inst.ty {
        ResourceType::ClockPath => ResourceInstance::new(
            ResourceType::Clock,
            ClockBlock::PathMux as u8,
            inst.block,
        ),
        _ => inst,
    }
}
