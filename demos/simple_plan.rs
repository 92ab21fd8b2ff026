use dev_utils::get_example_scenario;
use stochastic_csa::Planner;

fn main() {
    let (store, origin, start_time, destination) = get_example_scenario();
    let planner = Planner::new(&store);

    match planner.plan(&origin, &destination, start_time, 0.8) {
        Ok(route) if route.is_empty() => println!("No journey found within tolerance."),
        Ok(route) => {
            for segment in &route {
                println!(
                    "{:>10} -> {:<10} [{}] {} -> {}",
                    store.name_of(segment.departure_station).unwrap(),
                    store.name_of(segment.arrival_station).unwrap(),
                    segment.trip_id,
                    segment.departure_timestamp,
                    segment.arrival_timestamp,
                );
            }
        }
        Err(e) => println!("Query rejected: {e}"),
    }
}
