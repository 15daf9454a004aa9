//! End-to-end demo: locate a receiver inside a small deployment, then
//! route it to a destination over both spatial models.

use wayfinding::{
    formatter, Anchor, BeaconReading, GridCell, OccupancyGrid, OutputFormat, Point,
    PositioningEngine, WaypointGraph,
};

fn main() {
    let mut engine = PositioningEngine::with_defaults();
    engine.register_anchor(Anchor::new("lobby-nw", Point::new(0.0, 0.0), -59));
    engine.register_anchor(Anchor::new("lobby-ne", Point::new(10.0, 0.0), -59));
    engine.register_anchor(Anchor::new("lobby-sw", Point::new(0.0, 10.0), -59));
    engine.register_anchor(Anchor::new("lobby-se", Point::new(10.0, 10.0), -59));

    // A receiver near the room center hears all four beacons
    let readings = vec![
        BeaconReading::new("lobby-nw", -76),
        BeaconReading::new("lobby-ne", -76),
        BeaconReading::new("lobby-sw", -76),
        BeaconReading::new("lobby-se", -76),
    ];

    // Several scan rounds let the per-anchor filters settle
    let mut fix = engine.locate(&readings);
    for _ in 0..20 {
        fix = engine.locate(&readings);
    }

    let text = formatter(OutputFormat::Text);
    match &fix {
        Ok(fix) => {
            println!("{}", text.format_fix(fix));

            // Way-point route from the fix to the far corridor end
            let mut graph = WaypointGraph::new();
            graph.insert_node(1, Point::new(5.0, 5.0));
            graph.insert_node(2, Point::new(5.0, 12.0));
            graph.insert_node(3, Point::new(18.0, 12.0));
            graph.connect(1, 2);
            graph.connect(2, 3);
            let route = engine.route_on_graph(&graph, fix.position, Point::new(18.0, 12.0));
            println!("{}", text.format_route(&route));

            // The same trip on a coarse occupancy grid
            let grid = OccupancyGrid::open(8, 8);
            let route = engine.route_on_grid(&grid, GridCell::new(0, 0), GridCell::new(7, 7));
            println!("{}", text.format_route(&route));
        }
        Err(error) => println!("no fix: {}", error),
    }
}
