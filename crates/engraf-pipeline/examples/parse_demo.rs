//! Parse a few sentences against a small scene and print the results.
//!
//! Run with `cargo run -p engraf-pipeline --example parse_demo`.

use engraf_core::VectorSpace;
use engraf_pipeline::LatnExecutor;
use engraf_scene::{Scene, SceneObject};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut scene = Scene::new();
    let mut cube = SceneObject::new("cube_1", "cube", VectorSpace::new());
    cube.set_position(0.0, 0.0, 0.0);
    scene.add_object(cube);
    let mut sphere = SceneObject::new("sphere_1", "sphere", VectorSpace::new());
    sphere.set_position(3.0, 0.0, 0.0);
    scene.add_object(sphere);

    let executor = LatnExecutor::with_scene(scene);
    for input in [
        "draw a red cube",
        "move the sphere above the cube",
        "the cube and the sphere are tall",
        "make it bigger",
    ] {
        println!("\n=== {input}");
        let result = executor.execute_layer5(input);
        println!(
            "success={} confidence={:.2} -- {}",
            result.success, result.confidence, result.description
        );
        for hyp in result.hypotheses.iter().take(3) {
            println!("  {hyp}");
        }
        if let Some(best) = result.best_hypothesis() {
            println!("{}", best.render_diagnostic());
        }
        if let Some(serialized) = result.serialized() {
            println!("  structure: {serialized}");
        }
    }

    if let Some(scene) = executor.scene() {
        if let Ok(json) = serde_json::to_string_pretty(scene) {
            println!("\n=== scene state\n{json}");
        }
    }
}
