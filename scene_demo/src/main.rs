//! Headless walkthrough of the scene lifecycle
//!
//! Builds a two-storey map scene, registers furniture before loading,
//! imports the scene, late-binds more objects through the simulator and
//! prints a few spatial queries.

use sim_scene::foundation::logging;
use sim_scene::prelude::*;

const GROUND_FLOOR: [&str; 12] = [
    "############",
    "#..........#",
    "#..........#",
    "#....#.....#",
    "#....#.....#",
    "#....#.....#",
    "#....#.....#",
    "#....#######",
    "#..........#",
    "#..........#",
    "#..........#",
    "############",
];

fn build_scene() -> Result<Scene<TraversableMapScene>, Box<dyn std::error::Error>> {
    let floors = vec![
        FloorMap::new(0.0, OccupancyGrid::from_rows(&GROUND_FLOOR)?),
        FloorMap::new(3.0, OccupancyGrid::free(12)?),
    ];
    let config = TraversableMapConfig::default()
        .with_resolution(0.5)
        .with_erosion(1)
        .with_seed(2024);

    let mut scene = Scene::new(TraversableMapScene::new(config, floors)?);
    scene.add_object(share(
        PrimitiveObject::cube("fridge", 0.4)
            .with_category(ObjectCategory::Articulated)
            .with_states(ObjectStates::OPEN),
    ))?;
    scene.add_object(share(
        PrimitiveObject::cube("stove", 0.3)
            .with_category(ObjectCategory::Static)
            .with_states(ObjectStates::TOGGLED_ON | ObjectStates::HEAT_SOURCE),
    ))?;
    Ok(scene)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let scene = build_scene()?;
    let mut sim: Simulator<TraversableMapScene> = Simulator::new(HeadlessBackend::new());
    let ids = sim.import_scene(scene)?;
    log::info!("Scene imported with {} bodies", ids.len());

    let late = sim.import_object(share(
        PrimitiveObject::cube("apple", 0.05).at(Vec3::new(0.5, 0.5, 0.05)),
    ))?;
    log::info!("Late object bodies: {:?}", late);
    sim.import_object(share(PrimitiveObject::visual_marker("goal", 0.1)))?;

    let Some(scene) = sim.scene_mut() else {
        return Ok(());
    };

    let openable = scene.objects_with_state(ObjectStates::OPEN);
    log::info!(
        "{} objects tracked, {} openable",
        scene.objects().len(),
        openable.len()
    );

    let (floor, point) = scene.random_point(None)?;
    log::info!(
        "Random point on floor {floor} (height {:.2}): {:?}",
        scene.floor_height(floor),
        point
    );

    let source = Point2::new(-1.5, -1.0);
    let target = Point2::new(1.5, -1.0);
    match scene.shortest_path(0, source, target, true) {
        Ok(path) => log::info!(
            "Ground floor path: {:.2} m over {} waypoints",
            path.distance,
            path.waypoints.map_or(0, |w| w.len())
        ),
        Err(err) => log::warn!("No ground floor path: {err}"),
    }

    Ok(())
}
