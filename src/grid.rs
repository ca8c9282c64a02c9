use crate::core::Core;
use crate::direction::CoreDirection;
use crate::error::{CpuException, Result};
use crate::memory::Memory;
use crate::settings::Settings;

/// The spatial arrangement of cores.
///
/// The grid owns every core; cores refer to each other through linear ids
/// and [`offset`](#method.offset), never through references, so the cyclic
/// shape of the hardware stays acyclic in the model.
#[derive(Clone, Debug)]
pub struct CoreGrid {
    dims: [usize; 3],
    cores: Vec<Core>,
}

impl CoreGrid {
    pub fn new(settings: &Settings) -> CoreGrid {
        let dims = [
            settings.cores[0] as usize,
            settings.cores[1] as usize,
            settings.cores[2] as usize,
        ];
        let cores = (0..settings.core_count()).map(Core::new).collect();
        CoreGrid { dims, cores }
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn core(&self, id: usize) -> &Core {
        &self.cores[id]
    }

    pub fn core_mut(&mut self, id: usize) -> &mut Core {
        &mut self.cores[id]
    }

    /// Resolves the neighbour of `id` along a direction tuple.
    ///
    /// Each axis wraps around, so on a 1-wide axis every offset leads back
    /// to the same coordinate.
    pub fn offset(&self, id: usize, direction: &CoreDirection) -> usize {
        let [dx, dy, dz] = self.dims;
        let x = id % dx;
        let y = id / dx % dy;
        let z = id / (dx * dy) % dz;

        let shift = |coordinate: usize, dim: usize, offset: i8| {
            (coordinate + dim).wrapping_add(offset as usize) % dim
        };

        let x = shift(x, dx, direction.x.offset());
        let y = shift(y, dy, direction.y.offset());
        let z = shift(z, dz, direction.z.offset());
        (z * dy + y) * dx + x
    }

    /// Phase 1 for a single core: plan against tick-start state, then
    /// commit to the preload register.
    pub fn preload(&mut self, id: usize, memory: &Memory, force: bool) -> Result<()> {
        let requester = self.core(id);
        let ctc = requester.registers().status1.ctc;

        let staged = requester.plan_preload(memory, force, |direction| {
            if direction.is_self() {
                return Err(CpuException::self_fetch_forbidden(id));
            }
            let neighbour = self.offset(id, direction);
            if neighbour == id {
                return Err(CpuException::self_fetch_forbidden(id));
            }
            Ok(self.core(neighbour).get_from(ctc))
        })?;

        self.core_mut(id).commit_preload(staged);
        Ok(())
    }

    /// Phase 2 for a single core.
    pub fn fetch(&mut self, id: usize, memory: &Memory) -> Result<bool> {
        self.core_mut(id).fetch(memory)
    }

    /// Preload and fetch-execute for a single core, the unit the lockstep
    /// driver repeats over the whole grid.
    pub fn step(&mut self, id: usize, memory: &Memory) -> Result<bool> {
        self.preload(id, memory, false)?;
        self.fetch(id, memory)
    }
}
