use crate::types::Vec3;

/// A sector seated at a grid origin. `sector` indexes the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub sector: usize,
    pub size: Vec3,
}

/// Chunk-addressed 3D grid of sector origins, stored flat in x, y, z raster order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeGrid {
    size: Vec3,
    slots: Vec<Option<Slot>>,
}

impl VolumeGrid {
    pub fn new(size: Vec3) -> Self {
        let len = size.x.max(0) * size.y.max(0) * size.z.max(0);
        Self {
            size,
            slots: vec![None; len as usize],
        }
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.size.x
            && pos.y < self.size.y
            && pos.z < self.size.z
    }

    fn index(&self, pos: Vec3) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(((pos.x * self.size.y + pos.y) * self.size.z + pos.z) as usize)
    }

    fn position(&self, index: usize) -> Vec3 {
        let index = index as i32;
        let z = index % self.size.z;
        let y = (index / self.size.z) % self.size.y;
        let x = index / (self.size.z * self.size.y);
        Vec3::new(x, y, z)
    }

    pub fn get(&self, pos: Vec3) -> Option<Slot> {
        self.index(pos).and_then(|i| self.slots[i])
    }

    pub fn set(&mut self, pos: Vec3, slot: Slot) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.slots[i] = Some(slot);
                true
            }
            None => false,
        }
    }

    pub fn take(&mut self, pos: Vec3) -> Option<Slot> {
        self.index(pos).and_then(|i| self.slots[i].take())
    }

    /// x outermost, z innermost.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.slots.len()).map(move |i| self.position(i))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Vec3, Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.map(|s| (self.position(i), s)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
