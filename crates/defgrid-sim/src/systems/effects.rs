//! Effect bookkeeping: particle and floating-text lifetimes.

use hecs::{Entity, World};

use defgrid_core::components::{FloatingText, Particle};
use defgrid_core::constants::FLOATING_TEXT_DRIFT;
use defgrid_core::types::Position;

/// Age every effect by one tick and remove the expired ones.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, particle) in world.query_mut::<&mut Particle>() {
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (text, position)) in world.query_mut::<(&mut FloatingText, &mut Position)>() {
        text.life = text.life.saturating_sub(1);
        position.y -= FLOATING_TEXT_DRIFT;
        if text.life == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
