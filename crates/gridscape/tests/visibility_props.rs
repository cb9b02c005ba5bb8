//! Property tests: the visible list always matches the cached viewport.

mod common;

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use gridscape::{CachedViewport, Entity, EntityManager};
use gridscape_core::Point;

use common::*;

#[derive(Debug, Clone)]
enum Op {
    Move { index: usize, x: i32, y: i32 },
    SetZ { index: usize, z: i32 },
    TogglePixel { index: usize },
    Scroll { x: i32, y: i32 },
    Remove { index: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..16, -30i32..30, -30i32..30).prop_map(|(index, x, y)| Op::Move { index, x, y }),
        (0usize..16, -5i32..5).prop_map(|(index, z)| Op::SetZ { index, z }),
        (0usize..16).prop_map(|index| Op::TogglePixel { index }),
        (-15i32..15, -15i32..15).prop_map(|(x, y)| Op::Scroll { x, y }),
        (0usize..16).prop_map(|index| Op::Remove { index }),
    ]
}

fn entity(kind: u8, x: i32, y: i32, z: i32) -> Arc<Entity> {
    match kind {
        0 => cell_entity(x, y, z),
        1 => pixel_entity(x * CELL.width, y * CELL.height, z),
        _ => surface_entity(x, y, 3, 2, z),
    }
}

fn assert_consistent(manager: &EntityManager, host: &TestHost) {
    let viewport = CachedViewport::capture(host);
    let visible = manager.visible_entities();

    for entity in manager.entities() {
        let listed = visible.iter().any(|other| other.id() == entity.id());
        assert_eq!(listed, viewport.is_visible(&entity.geometry()), "entity {}", entity.id());
    }
    assert!(visible.windows(2).all(|pair| pair[0].z_index() <= pair[1].z_index()));
}

proptest! {
    #[test]
    fn visible_list_tracks_viewport(
        seeds in prop::collection::vec((0u8..3, -20i32..20, -20i32..20, -5i32..5), 1..16),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let host = TestHost::new(12, 8);
        let manager = EntityManager::new();
        let entities: Vec<_> = seeds
            .iter()
            .map(|&(kind, x, y, z)| entity(kind, x, y, z))
            .collect();
        manager.add_range(entities.iter().cloned());
        manager.attach_to_host(host.clone()).unwrap();
        assert_consistent(&manager, &host);

        for op in ops {
            match op {
                Op::Move { index, x, y } => {
                    let entity = &entities[index % entities.len()];
                    let position = if entity.uses_pixel_positioning() {
                        Point::new(x * CELL.width, y * CELL.height)
                    } else {
                        Point::new(x, y)
                    };
                    entity.set_position(position);
                }
                Op::SetZ { index, z } => entities[index % entities.len()].set_z_index(z),
                Op::TogglePixel { index } => {
                    let entity = &entities[index % entities.len()];
                    entity.set_use_pixel_positioning(!entity.uses_pixel_positioning());
                }
                Op::Scroll { x, y } => {
                    host.scroll_to(x, y);
                    manager.update(Duration::from_millis(16));
                }
                Op::Remove { index } => {
                    manager.remove(&entities[index % entities.len()]);
                }
            }
            assert_consistent(&manager, &host);
        }
    }

    #[test]
    fn mark_clean_then_offscreen_moves_stay_clean(
        moves in prop::collection::vec((40i32..80, 40i32..80), 1..20),
    ) {
        let host = TestHost::new(12, 8);
        let manager = EntityManager::new();
        let offscreen = cell_entity(100, 100, 0);
        manager.add(&offscreen);
        manager.add(&cell_entity(1, 1, 0));
        manager.attach_to_host(host.clone()).unwrap();
        manager.mark_clean();

        for (x, y) in moves {
            offscreen.set_position(Point::new(x, y));
            manager.update(Duration::from_millis(16));
        }
        prop_assert!(!manager.is_dirty());
    }

    #[test]
    fn pixel_and_cell_positions_agree(x in -20i32..20, y in -20i32..20, sx in -10i32..10, sy in -10i32..10) {
        let host = TestHost::new(12, 8);
        host.scroll_to(sx, sy);
        let viewport = CachedViewport::capture(&*host);

        let cell = cell_entity(x, y, 0);
        let pixel = pixel_entity(x * CELL.width, y * CELL.height, 0);
        if viewport.is_visible(&cell.geometry()) {
            prop_assert!(viewport.is_visible(&pixel.geometry()));
        }
    }
}
