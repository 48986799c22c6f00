//! The particle field: points scattered in a cube, coloured from the palette.

use rand::Rng;

use super::types::{hex_rgb, PALETTE, PARTICLE_COUNT, PARTICLE_SPREAD};
use crate::backend::GeometryData;
use crate::matrix::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let half = PARTICLE_SPREAD / 2.0;
        let palette: Vec<Vec3> = PALETTE.iter().map(|&c| hex_rgb(c)).collect();

        let mut positions = Vec::with_capacity(PARTICLE_COUNT);
        let mut colors = Vec::with_capacity(PARTICLE_COUNT);
        for _ in 0..PARTICLE_COUNT {
            positions.push([
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ]);
            colors.push(palette[rng.gen_range(0..palette.len())]);
        }

        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn to_geometry(&self) -> GeometryData {
        GeometryData::Points {
            positions: self.positions.clone(),
            colors: self.colors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn five_hundred_points_inside_cube() {
        let field = ParticleField::generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(field.len(), 500);
        assert!(field
            .positions
            .iter()
            .flatten()
            .all(|c| (-40.0..40.0).contains(c)));
    }

    #[test]
    fn colors_come_from_palette() {
        let field = ParticleField::generate(&mut StdRng::seed_from_u64(7));
        let palette: Vec<Vec3> = PALETTE.iter().map(|&c| hex_rgb(c)).collect();
        assert!(field.colors.iter().all(|c| palette.contains(c)));
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::generate(&mut StdRng::seed_from_u64(42));
        let b = ParticleField::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn geometry_is_valid() {
        let field = ParticleField::generate(&mut StdRng::seed_from_u64(1));
        assert!(field.to_geometry().validate().is_ok());
    }
}
