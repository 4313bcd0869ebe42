//! Resource manager
//!
//! Drivers claim hardware here before touching it. A resource is either free
//! or reserved; [`ResourceManager::reserve`] and the `allocate*` family move
//! it to reserved, [`ResourceManager::free`] moves it back.
//!
//! ```
//! use psoc6_hwmgr::{devices::psoc6_01, Error, ResourceInstance, ResourceManager, ResourceType};
//!
//! static HWMGR: ResourceManager<{ psoc6_01::CATALOG.bitmap_bytes() }> =
//!     ResourceManager::new(&psoc6_01::CATALOG);
//!
//! fn uart_with_dma() -> Result<(ResourceInstance, ResourceInstance), Error> {
//!     let scb = ResourceInstance::block(ResourceType::Scb, 2);
//!     HWMGR.reserve(scb)?;
//!     let dma = HWMGR.allocate_dma()?;
//!     Ok((scb, dma))
//! }
//!
//! let (scb, dma) = uart_with_dma().unwrap();
//! assert_eq!(dma.ty, ResourceType::Dw);
//! assert_eq!(uart_with_dma(), Err(Error::InUse));
//! HWMGR.free(dma).unwrap();
//! HWMGR.free(scb).unwrap();
//! ```
//!
//! Every access to the bitmaps happens inside a `critical_section`, which is
//! released on all paths. Searches claim one candidate per critical section,
//! so a concurrent reservation can only make a candidate fail, never hand it
//! out twice.

use core::cell::RefCell;
use critical_section::Mutex;

use crate::bitmap::BitmapStore;
use crate::catalog::Catalog;
use crate::error::Error;
use crate::resource::{DividerType, ResourceInstance, ResourceType};
use crate::routing::SignalRouting;

struct State<const BYTES: usize> {
    /// Bit set while the resource is owned by a driver
    reserved: BitmapStore<BYTES>,
    /// Bit set once the owner has configured the hardware
    configured: BitmapStore<BYTES>,
}

impl<const BYTES: usize> State<BYTES> {
    const fn new() -> Self {
        Self {
            reserved: BitmapStore::new(),
            configured: BitmapStore::new(),
        }
    }

    fn reserve(&mut self, bit: u16) -> Result<(), Error> {
        if self.reserved.is_set(bit) {
            return Err(Error::InUse);
        }
        self.reserved.set(bit);
        Ok(())
    }

    fn free(&mut self, bit: u16) -> Result<(), Error> {
        if !self.reserved.is_set(bit) {
            return Err(Error::NotReserved);
        }
        self.reserved.clear(bit);
        self.configured.clear(bit);
        Ok(())
    }
}

/// Bitmap backed allocator for the resources of one [`Catalog`].
///
/// `BYTES` is the bitmap size, normally `{ CATALOG.bitmap_bytes() }`:
///
/// ```
/// use psoc6_hwmgr::{devices::psoc6_02, ResourceManager};
///
/// static HWMGR: ResourceManager<{ psoc6_02::CATALOG.bitmap_bytes() }> =
///     ResourceManager::new(&psoc6_02::CATALOG);
/// ```
pub struct ResourceManager<const BYTES: usize> {
    catalog: &'static Catalog,
    state: Mutex<RefCell<State<BYTES>>>,
}

impl<const BYTES: usize> ResourceManager<BYTES> {
    /// Create a [`ResourceManager`] with nothing reserved.
    ///
    /// Panics if `BYTES` is too small for `catalog`.
    pub const fn new(catalog: &'static Catalog) -> Self {
        assert!(
            BYTES >= catalog.bitmap_bytes(),
            "bitmap too small for catalog"
        );
        Self {
            catalog,
            state: Mutex::new(RefCell::new(State::new())),
        }
    }

    /// The catalog this manager allocates from.
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State<BYTES>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.state.borrow_ref_mut(cs)))
    }

    /// Release everything, as after boot.
    pub fn reset(&self) {
        self.with_state(|state| {
            state.reserved.clear_all();
            state.configured.clear_all();
        });
    }

    /// Claim `inst`.
    ///
    /// Fails with [`Error::InvalidResource`] if the catalog has no such
    /// resource and with [`Error::InUse`] if someone already holds it; the
    /// bitmap is unchanged in both cases.
    pub fn reserve(&self, inst: ResourceInstance) -> Result<(), Error> {
        self.claim(inst).inspect_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::debug!("hwmgr: cannot reserve {}: {}", inst, _e);
        })
    }

    /// [`Self::reserve`] without logging failures, for searches.
    fn claim(&self, inst: ResourceInstance) -> Result<(), Error> {
        let bit = self.catalog.bit_position(inst)?;
        self.with_state(|state| state.reserve(bit))?;
        #[cfg(feature = "defmt")]
        defmt::trace!("hwmgr: reserved {}", inst);
        Ok(())
    }

    /// Release `inst` and forget its configured flag.
    ///
    /// Releasing a resource that is not reserved is a bug in the caller and
    /// is reported as [`Error::NotReserved`] without touching the bitmap.
    pub fn free(&self, inst: ResourceInstance) -> Result<(), Error> {
        let result = self
            .catalog
            .bit_position(inst)
            .and_then(|bit| self.with_state(|state| state.free(bit)));
        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("hwmgr: freed {}", inst);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("hwmgr: cannot free {}: {}", inst, _e);
            }
        }
        result
    }

    /// Whether `inst` is currently reserved.
    pub fn is_reserved(&self, inst: ResourceInstance) -> Result<bool, Error> {
        let bit = self.catalog.bit_position(inst)?;
        Ok(self.with_state(|state| state.reserved.is_set(bit)))
    }

    /// Claim every resource in `insts`, or none of them.
    ///
    /// The whole set is checked and claimed in a single critical section.
    /// Listing a resource twice fails with [`Error::InUse`].
    pub fn reserve_all(&self, insts: &[ResourceInstance]) -> Result<(), Error> {
        self.with_state(|state| {
            for (i, inst) in insts.iter().enumerate() {
                let claimed = self
                    .catalog
                    .bit_position(*inst)
                    .and_then(|bit| state.reserve(bit));
                if let Err(e) = claimed {
                    for done in &insts[..i] {
                        if let Ok(bit) = self.catalog.bit_position(*done) {
                            state.reserved.clear(bit);
                        }
                    }
                    #[cfg(feature = "defmt")]
                    defmt::debug!("hwmgr: cannot reserve {}: {}", inst, e);
                    return Err(e);
                }
            }
            Ok(())
        })
    }

    /// Reserve the first free candidate accepted by `accept`, in bit order.
    fn first_free(
        &self,
        candidates: impl Iterator<Item = ResourceInstance>,
        mut accept: impl FnMut(&ResourceInstance) -> bool,
    ) -> Option<ResourceInstance> {
        candidates
            .filter(|inst| accept(inst))
            .find(|inst| self.claim(*inst).is_ok())
    }

    /// Reserve any free resource of type `ty`.
    ///
    /// Candidates are tried in ascending bit order: for channel based types
    /// every channel of a block before the next block.
    pub fn allocate(&self, ty: ResourceType) -> Result<ResourceInstance, Error> {
        self.allocate_where(ty, |_| true)
    }

    /// Reserve the first free resource of type `ty` that `accept` allows.
    ///
    /// Rejected candidates are skipped without side effects.
    pub fn allocate_where(
        &self,
        ty: ResourceType,
        accept: impl FnMut(&ResourceInstance) -> bool,
    ) -> Result<ResourceInstance, Error> {
        self.first_free(self.catalog.instances(ty), accept)
            .ok_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::debug!("hwmgr: no free {}", ty);
                Error::NoneFree
            })
    }

    /// Reserve a resource of type `ty` that can receive `source` and drive
    /// `dest`, as decided by `routing`.
    ///
    /// Passing `None` for both is equivalent to [`Self::allocate`].
    pub fn allocate_with_connection<R: SignalRouting>(
        &self,
        ty: ResourceType,
        source: Option<R::Source>,
        dest: Option<R::Dest>,
        routing: &R,
    ) -> Result<ResourceInstance, Error> {
        self.allocate_where(ty, |inst| routing.accepts(inst, source, dest))
    }

    /// Reserve a resource of the first type in `types` that has one free.
    pub fn allocate_first_of(&self, types: &[ResourceType]) -> Result<ResourceInstance, Error> {
        types
            .iter()
            .find_map(|ty| self.allocate(*ty).ok())
            .ok_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::debug!("hwmgr: no free resource among {}", types);
                Error::NoneFree
            })
    }

    /// Reserve a DMA channel, preferring DataWire over the DMA controller.
    pub fn allocate_dma(&self) -> Result<ResourceInstance, Error> {
        self.allocate_first_of(&[ResourceType::Dw, ResourceType::Dma])
    }

    /// Reserve a peripheral clock divider of kind `divider`.
    ///
    /// With `accept_larger`, wider divider kinds are tried in turn once
    /// `divider` is exhausted.
    pub fn allocate_clock(
        &self,
        divider: DividerType,
        accept_larger: bool,
    ) -> Result<ResourceInstance, Error> {
        let all: &'static [DividerType] = &DividerType::ALL;
        let first = divider as usize;
        let kinds = if accept_larger {
            &all[first..]
        } else {
            &all[first..=first]
        };
        kinds
            .iter()
            .find_map(|kind| {
                let block = kind.block() as u8;
                self.first_free(
                    self.catalog.block_instances(ResourceType::Clock, block),
                    |_| true,
                )
            })
            .ok_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::debug!("hwmgr: no free {} divider", divider);
                Error::NoneFree
            })
    }

    /// Number of unreserved resources of type `ty`.
    pub fn available(&self, ty: ResourceType) -> usize {
        self.with_state(|state| {
            self.catalog
                .instances(ty)
                .filter_map(|inst| self.catalog.bit_position(inst).ok())
                .filter(|bit| !state.reserved.is_set(*bit))
                .count()
        })
    }

    /// Mark `inst` as configured.
    pub fn set_configured(&self, inst: ResourceInstance) -> Result<(), Error> {
        let bit = self.catalog.bit_position(inst)?;
        self.with_state(|state| state.configured.set(bit));
        Ok(())
    }

    /// Clear the configured mark of `inst`.
    pub fn set_unconfigured(&self, inst: ResourceInstance) -> Result<(), Error> {
        let bit = self.catalog.bit_position(inst)?;
        self.with_state(|state| state.configured.clear(bit));
        Ok(())
    }

    /// Whether `inst` is marked as configured.
    pub fn is_configured(&self, inst: ResourceInstance) -> Result<bool, Error> {
        let bit = self.catalog.bit_position(inst)?;
        Ok(self.with_state(|state| state.configured.is_set(bit)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::block_offsets;
    use crate::catalog::Layout;
    use crate::resource::ClockBlock;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    const CATALOG: Catalog = Catalog::builder()
        .with(ResourceType::Can, Layout::Channels(block_offsets!(3, 2)))
        .with(
            ResourceType::Clock,
            // 2 x 8 bit, 1 x 16 bit, no 16.5 bit, 1 x 24.5 bit dividers and
            // 2 clock paths
            Layout::Channels(block_offsets!(2, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2)),
        )
        .with(ResourceType::Dma, Layout::Channels(block_offsets!(2)))
        .with(ResourceType::Dw, Layout::Channels(block_offsets!(1)))
        .with(ResourceType::Gpio, Layout::Channels(block_offsets!(8, 8)))
        .with(ResourceType::Scb, Layout::Blocks(4))
        .with(ResourceType::Tcpwm, Layout::Channels(block_offsets!(2, 4)))
        .build();

    type Manager = ResourceManager<{ CATALOG.bitmap_bytes() }>;

    fn manager() -> Manager {
        ResourceManager::new(&CATALOG)
    }

    fn gpio(port: u8, pin: u8) -> ResourceInstance {
        ResourceInstance::new(ResourceType::Gpio, port, pin)
    }

    fn reserved_bits(mgr: &Manager) -> usize {
        mgr.with_state(|state| state.reserved.count_ones())
    }

    #[test]
    fn reserve_twice_is_in_use() {
        let mgr = manager();
        let scb = ResourceInstance::block(ResourceType::Scb, 2);
        assert_eq!(mgr.reserve(scb), Ok(()));
        assert_eq!(mgr.reserve(scb), Err(Error::InUse));
        assert_eq!(reserved_bits(&mgr), 1);

        assert_eq!(mgr.free(scb), Ok(()));
        assert_eq!(mgr.reserve(scb), Ok(()));
    }

    #[test]
    fn reserve_free_cycles_restore_state() {
        let mgr = manager();
        let pin = gpio(1, 4);
        for _ in 0..5 {
            assert_eq!(mgr.is_reserved(pin), Ok(false));
            assert_eq!(mgr.reserve(pin), Ok(()));
            assert_eq!(mgr.is_reserved(pin), Ok(true));
            assert_eq!(mgr.free(pin), Ok(()));
        }
        assert_eq!(reserved_bits(&mgr), 0);
    }

    #[test]
    fn invalid_resources_do_not_touch_the_bitmap() {
        let mgr = manager();
        for inst in [
            gpio(2, 0),
            gpio(0, 8),
            ResourceInstance::new(ResourceType::Can, 0, 3),
            ResourceInstance::new(ResourceType::Scb, 1, 1),
            ResourceInstance::block(ResourceType::Adc, 0),
        ] {
            assert_eq!(mgr.reserve(inst), Err(Error::InvalidResource));
            assert_eq!(mgr.free(inst), Err(Error::InvalidResource));
            assert_eq!(mgr.is_reserved(inst), Err(Error::InvalidResource));
            assert_eq!(mgr.set_configured(inst), Err(Error::InvalidResource));
        }
        assert_eq!(reserved_bits(&mgr), 0);
    }

    #[test]
    fn double_free_is_reported() {
        let mgr = manager();
        let pin = gpio(0, 0);
        assert_eq!(mgr.free(pin), Err(Error::NotReserved));
        mgr.reserve(pin).unwrap();
        mgr.free(pin).unwrap();
        assert_eq!(mgr.free(pin), Err(Error::NotReserved));
        assert_eq!(reserved_bits(&mgr), 0);
    }

    #[test]
    fn allocate_gpio_in_bit_order() {
        let mgr = manager();
        for port in 0..2 {
            for pin in 0..8 {
                assert_eq!(mgr.allocate(ResourceType::Gpio), Ok(gpio(port, pin)));
            }
        }
        assert_eq!(mgr.allocate(ResourceType::Gpio), Err(Error::NoneFree));
        assert_eq!(mgr.available(ResourceType::Gpio), 0);
    }

    #[test]
    fn allocate_can_exhausts_block_0_first() {
        let mgr = manager();
        let can = |b, c| ResourceInstance::new(ResourceType::Can, b, c);
        let expected = [can(0, 0), can(0, 1), can(0, 2), can(1, 0), can(1, 1)];
        for inst in expected {
            assert_eq!(mgr.allocate(ResourceType::Can), Ok(inst));
        }
        assert_eq!(mgr.allocate(ResourceType::Can), Err(Error::NoneFree));
    }

    #[test]
    fn allocate_skips_reserved_and_reuses_freed() {
        let mgr = manager();
        let scb = |b| ResourceInstance::block(ResourceType::Scb, b);
        mgr.reserve(scb(0)).unwrap();
        mgr.reserve(scb(2)).unwrap();
        assert_eq!(mgr.available(ResourceType::Scb), 2);
        assert_eq!(mgr.allocate(ResourceType::Scb), Ok(scb(1)));
        assert_eq!(mgr.allocate(ResourceType::Scb), Ok(scb(3)));
        assert_eq!(mgr.allocate(ResourceType::Scb), Err(Error::NoneFree));
        mgr.free(scb(2)).unwrap();
        assert_eq!(mgr.allocate(ResourceType::Scb), Ok(scb(2)));
    }

    #[test]
    fn allocate_absent_type_finds_nothing() {
        let mgr = manager();
        assert_eq!(mgr.allocate(ResourceType::Usb), Err(Error::NoneFree));
        assert_eq!(mgr.available(ResourceType::Usb), 0);
    }

    /// TCPWM counters routed to trigger lines by block: block 0 counters
    /// listen on line 0, block 1 counters on line 1. Only odd counters drive
    /// an output.
    struct Triggers;

    impl SignalRouting for Triggers {
        type Source = u8;
        type Dest = u8;

        fn output_of(&self, candidate: &ResourceInstance) -> Option<u8> {
            (candidate.channel % 2 == 1).then_some(10 + candidate.channel)
        }

        fn input_of(&self, candidate: &ResourceInstance) -> Option<u8> {
            Some(candidate.block)
        }

        fn can_connect(&self, source: u8, dest: u8) -> bool {
            match (source, dest) {
                // peripheral trigger 7 is wired to line 1 only
                (7, line) => line == 1,
                // counter outputs reach peripheral input 20 if they come from channel 3
                (out, 20) => out == 13,
                _ => false,
            }
        }
    }

    #[test]
    fn allocate_with_connection_filters_candidates() {
        let mgr = manager();
        let tcpwm = |b, c| ResourceInstance::new(ResourceType::Tcpwm, b, c);

        assert_eq!(
            mgr.allocate_with_connection(ResourceType::Tcpwm, Some(7), None, &Triggers),
            Ok(tcpwm(1, 0))
        );
        // Rejected candidates stay free
        assert_eq!(mgr.is_reserved(tcpwm(0, 0)), Ok(false));

        assert_eq!(
            mgr.allocate_with_connection(ResourceType::Tcpwm, Some(7), Some(20), &Triggers),
            Ok(tcpwm(1, 3))
        );
        assert_eq!(
            mgr.allocate_with_connection(ResourceType::Tcpwm, Some(7), Some(20), &Triggers),
            Err(Error::NoneFree)
        );
        assert_eq!(
            mgr.allocate_with_connection::<Triggers>(ResourceType::Tcpwm, None, None, &Triggers),
            Ok(tcpwm(0, 0))
        );
        assert_eq!(mgr.available(ResourceType::Tcpwm), 3);
    }

    #[test]
    fn allocate_clock_widens_on_request() {
        let mgr = manager();
        let div = |block: ClockBlock, ch| ResourceInstance::new(ResourceType::Clock, block as u8, ch);

        assert_eq!(
            mgr.allocate_clock(DividerType::Div8, false),
            Ok(div(ClockBlock::Peripheral8Bit, 0))
        );
        assert_eq!(
            mgr.allocate_clock(DividerType::Div8, false),
            Ok(div(ClockBlock::Peripheral8Bit, 1))
        );
        assert_eq!(mgr.allocate_clock(DividerType::Div8, false), Err(Error::NoneFree));
        assert_eq!(
            mgr.allocate_clock(DividerType::Div8, true),
            Ok(div(ClockBlock::Peripheral16Bit, 0))
        );
        // No 16.5 bit dividers on this device, so the 24.5 bit one is next
        assert_eq!(
            mgr.allocate_clock(DividerType::Div16_5, true),
            Ok(div(ClockBlock::Peripheral24_5Bit, 0))
        );
        assert_eq!(mgr.allocate_clock(DividerType::Div8, true), Err(Error::NoneFree));
    }

    #[test]
    fn clock_paths_share_bits_with_the_path_mux() {
        let mgr = manager();
        let path = |p| ResourceInstance::block(ResourceType::ClockPath, p);
        let mux = |p| ResourceInstance::new(ResourceType::Clock, ClockBlock::PathMux as u8, p);

        mgr.reserve(path(1)).unwrap();
        assert_eq!(mgr.reserve(mux(1)), Err(Error::InUse));
        assert_eq!(mgr.is_reserved(mux(1)), Ok(true));
        assert_eq!(mgr.free(mux(1)), Ok(()));
        assert_eq!(mgr.is_reserved(path(1)), Ok(false));

        mgr.reserve(mux(0)).unwrap();
        assert_eq!(mgr.reserve(path(0)), Err(Error::InUse));
        assert_eq!(mgr.free(path(0)), Ok(()));
        assert_eq!(mgr.free(mux(0)), Err(Error::NotReserved));
        assert_eq!(reserved_bits(&mgr), 0);

        assert_eq!(mgr.reserve(path(2)), Err(Error::InvalidResource));
        assert_eq!(mgr.available(ResourceType::ClockPath), 2);
        assert_eq!(mgr.allocate(ResourceType::ClockPath), Ok(path(0)));
        assert_eq!(mgr.allocate(ResourceType::ClockPath), Ok(path(1)));
        assert_eq!(mgr.allocate(ResourceType::ClockPath), Err(Error::NoneFree));
        assert_eq!(mgr.is_reserved(mux(1)), Ok(true));
        assert_eq!(reserved_bits(&mgr), 2);
    }

    #[test]
    fn allocate_dma_prefers_datawire() {
        let mgr = manager();
        assert_eq!(
            mgr.allocate_dma(),
            Ok(ResourceInstance::new(ResourceType::Dw, 0, 0))
        );
        assert_eq!(
            mgr.allocate_dma(),
            Ok(ResourceInstance::new(ResourceType::Dma, 0, 0))
        );
        assert_eq!(
            mgr.allocate_dma(),
            Ok(ResourceInstance::new(ResourceType::Dma, 0, 1))
        );
        assert_eq!(mgr.allocate_dma(), Err(Error::NoneFree));
    }

    #[test]
    fn reserve_all_is_all_or_nothing() {
        let mgr = manager();
        let scb = ResourceInstance::block(ResourceType::Scb, 0);
        mgr.reserve(gpio(1, 1)).unwrap();

        assert_eq!(
            mgr.reserve_all(&[scb, gpio(0, 0), gpio(1, 1)]),
            Err(Error::InUse)
        );
        assert_eq!(mgr.reserve_all(&[scb, gpio(0, 9)]), Err(Error::InvalidResource));
        assert_eq!(mgr.reserve_all(&[scb, gpio(0, 0), scb]), Err(Error::InUse));
        assert_eq!(reserved_bits(&mgr), 1);

        assert_eq!(mgr.reserve_all(&[scb, gpio(0, 0)]), Ok(()));
        assert_eq!(reserved_bits(&mgr), 3);
    }

    #[test]
    fn configured_flag_follows_owner() {
        let mgr = manager();
        let div = ResourceInstance::new(ResourceType::Clock, 0, 1);
        mgr.reserve(div).unwrap();
        assert_eq!(mgr.is_configured(div), Ok(false));
        mgr.set_configured(div).unwrap();
        assert_eq!(mgr.is_configured(div), Ok(true));
        mgr.set_unconfigured(div).unwrap();
        assert_eq!(mgr.is_configured(div), Ok(false));

        mgr.set_configured(div).unwrap();
        mgr.free(div).unwrap();
        assert_eq!(mgr.is_configured(div), Ok(false));
    }

    #[test]
    fn reset_releases_everything() {
        let mgr = manager();
        while mgr.allocate(ResourceType::Gpio).is_ok() {}
        mgr.set_configured(gpio(0, 0)).unwrap();
        mgr.reset();
        assert_eq!(reserved_bits(&mgr), 0);
        assert_eq!(mgr.is_configured(gpio(0, 0)), Ok(false));
        assert_eq!(mgr.available(ResourceType::Gpio), 16);
    }

    #[test]
    fn matches_a_model_under_random_operations() {
        let mgr = manager();
        let mut model = [false; CATALOG.bit_count()];
        let mut rng = SmallRng::seed_from_u64(0x6877_6d67);

        for _ in 0..2000 {
            let bit = rng.random_range(0..CATALOG.bit_count() as u16);
            let inst = CATALOG.resource_at(bit).unwrap();
            let slot = &mut model[usize::from(bit)];
            if rng.random_bool(0.5) {
                let expected = if *slot { Err(Error::InUse) } else { Ok(()) };
                assert_eq!(mgr.reserve(inst), expected);
                *slot = true;
            } else {
                let expected = if *slot { Ok(()) } else { Err(Error::NotReserved) };
                assert_eq!(mgr.free(inst), expected);
                *slot = false;
            }
        }
        for (bit, reserved) in model.iter().enumerate() {
            let inst = CATALOG.resource_at(bit as u16).unwrap();
            assert_eq!(mgr.is_reserved(inst), Ok(*reserved));
        }
    }

    #[test]
    fn concurrent_allocations_are_distinct() {
        let mgr = manager();
        let mut taken = [[None; 4]; 4];
        std::thread::scope(|s| {
            for row in taken.iter_mut() {
                let mgr = &mgr;
                s.spawn(move || {
                    for slot in row.iter_mut() {
                        *slot = mgr.allocate(ResourceType::Gpio).ok();
                    }
                });
            }
        });

        let mut seen = [false; 16];
        for inst in taken.iter().flatten() {
            let inst = inst.unwrap();
            let idx = usize::from(inst.block) * 8 + usize::from(inst.channel);
            assert!(!seen[idx], "{:?} handed out twice", inst);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(mgr.allocate(ResourceType::Gpio), Err(Error::NoneFree));
    }
}
