//! Game objects and their per-category collections

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// One obstacle, collectable or power-up pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Center of the collision box
    pub pos: Vec2,
    /// Still in play; inactive objects are dropped at the end of the tick
    pub active: bool,
}

impl GameObject {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, active: true }
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Owner of every live entity, one collection per category
///
/// Collections only shrink through [`EntityStore::compact`] (or a reset);
/// nothing is removed while a category is being iterated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    obstacles: Vec<GameObject>,
    collectables: Vec<GameObject>,
    invincibility: Vec<GameObject>,
    double_points: Vec<GameObject>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All objects of a category, including ones pending removal
    pub fn get(&self, category: Category) -> &[GameObject] {
        match category {
            Category::Obstacle => &self.obstacles,
            Category::Collectable => &self.collectables,
            Category::Invincibility => &self.invincibility,
            Category::DoublePoints => &self.double_points,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<GameObject> {
        match category {
            Category::Obstacle => &mut self.obstacles,
            Category::Collectable => &mut self.collectables,
            Category::Invincibility => &mut self.invincibility,
            Category::DoublePoints => &mut self.double_points,
        }
    }

    pub fn push(&mut self, category: Category, object: GameObject) {
        self.get_mut(category).push(object);
    }

    pub fn iter_active(&self, category: Category) -> impl Iterator<Item = &GameObject> {
        self.get(category).iter().filter(|o| o.active)
    }

    pub fn active_count(&self, category: Category) -> usize {
        self.iter_active(category).count()
    }

    /// Live pickups of both power-up kinds (they share one cap)
    pub fn power_up_count(&self) -> usize {
        self.active_count(Category::Invincibility) + self.active_count(Category::DoublePoints)
    }

    /// Positions of active objects, in insertion order
    pub fn active_positions(&self, category: Category) -> Vec<Vec2> {
        self.iter_active(category).map(|o| o.pos).collect()
    }

    /// Drop every inactive object; returns how many were removed
    pub fn compact(&mut self) -> usize {
        let mut removed = 0;
        for category in Category::ALL {
            let objects = self.get_mut(category);
            let before = objects.len();
            objects.retain(|o| o.active);
            removed += before - objects.len();
        }
        removed
    }

    pub fn clear(&mut self) {
        for category in Category::ALL {
            self.get_mut(category).clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.get(c).is_empty())
    }

    pub fn total_len(&self) -> usize {
        Category::ALL.iter().map(|&c| self.get(c).len()).sum()
    }
}
