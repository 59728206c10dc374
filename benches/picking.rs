use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voxpaint::core::camera::Camera;
use voxpaint::core::types::{Vec2, Vec3};
use voxpaint::interaction::RayPicker;
use voxpaint::scene::SceneGraph;
use voxpaint::voxel::{GridCell, Lattice, Material, OccupancyStore, Rgb};

const CELL_WIDTH: f32 = 50.0;

/// Fill a `side` x `side` floor, `height` cells tall, around the origin
fn populated_store(side: i32, height: i32) -> OccupancyStore {
    let mut store = OccupancyStore::new();
    let half = side / 2;
    for y in 0..height {
        for x in -half..half {
            for z in -half..half {
                let _ = store.place(GridCell::new(x, y, z), Material::default());
            }
        }
    }
    store
}

fn bench_pick_ground_only(c: &mut Criterion) {
    let picker = RayPicker::new(Lattice::new(CELL_WIDTH), 1000.0);
    let store = OccupancyStore::new();
    let camera = Camera::default();
    let ray = camera.ray_from_ndc(Vec2::new(0.1, -0.2));

    c.bench_function("pick_ground_only", |b| {
        b.iter(|| picker.pick(black_box(&ray), store.all()));
    });
}

fn bench_pick_400_voxels(c: &mut Criterion) {
    let picker = RayPicker::new(Lattice::new(CELL_WIDTH), 1000.0);
    let store = populated_store(20, 1);
    let camera = Camera::default();
    let ray = camera.ray_from_ndc(Vec2::ZERO);

    c.bench_function("pick_400_voxels", |b| {
        b.iter(|| picker.pick(black_box(&ray), store.all()));
    });
}

fn bench_pick_2000_voxels(c: &mut Criterion) {
    let picker = RayPicker::new(Lattice::new(CELL_WIDTH), 1000.0);
    let store = populated_store(20, 5);
    let camera = Camera::default();
    let ray = camera.ray_from_ndc(Vec2::ZERO);

    c.bench_function("pick_2000_voxels", |b| {
        b.iter(|| picker.pick(black_box(&ray), store.all()));
    });
}

fn bench_flatten_400_voxels(c: &mut Criterion) {
    let lattice = Lattice::new(CELL_WIDTH);
    let mut scene = SceneGraph::new(CELL_WIDTH, Rgb::from_hex(0xff0000), 0.5);
    for voxel in populated_store(20, 1).all() {
        scene.add_voxel(voxel.id, lattice.cell_center(voxel.cell), voxel.material.color);
    }
    let eye = Vec3::new(500.0, 800.0, 1300.0);

    c.bench_function("flatten_400_voxels", |b| {
        b.iter(|| scene.flatten(black_box(eye)));
    });
}

criterion_group!(
    benches,
    bench_pick_ground_only,
    bench_pick_400_voxels,
    bench_pick_2000_voxels,
    bench_flatten_400_voxels,
);
criterion_main!(benches);
