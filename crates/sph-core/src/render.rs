use crate::particle::ParticleSet;

/// GPU-compatible particle snapshot: 24 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParticle {
    pub position: [f32; 2], //  8 bytes
    pub velocity: [f32; 2], //  8 bytes
    pub density: f32,       //  4 bytes
    pub pressure: f32,      //  4 bytes
}

/// Refill `out` from the particle arrays, reusing its allocation.
pub fn write_render_buffer(particles: &ParticleSet, out: &mut Vec<RenderParticle>) {
    out.clear();
    out.extend(
        particles
            .positions()
            .iter()
            .zip(particles.velocities())
            .zip(particles.densities().iter().zip(particles.pressures()))
            .map(|((pos, vel), (density, pressure))| RenderParticle {
                position: pos.to_array(),
                velocity: vel.to_array(),
                density: *density,
                pressure: *pressure,
            }),
    );
}

/// Raw bytes of a snapshot, ready for a vertex/storage buffer upload.
pub fn as_bytes(buffer: &[RenderParticle]) -> &[u8] {
    bytemuck::cast_slice(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_render_particle_layout() {
        assert_eq!(std::mem::size_of::<RenderParticle>(), 24);
    }

    #[test]
    fn test_buffer_mirrors_particles() {
        let mut particles = ParticleSet::new();
        particles.add(Vec2::new(1.0, 2.0));
        particles.add(Vec2::new(3.0, 4.0));
        particles.set_velocity(1, Vec2::new(-1.0, 0.5)).unwrap();

        let mut out = vec![RenderParticle::default(); 7];
        write_render_buffer(&particles, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].position, [1.0, 2.0]);
        assert_eq!(out[1].velocity, [-1.0, 0.5]);
        assert_eq!(as_bytes(&out).len(), 48);
    }
}
