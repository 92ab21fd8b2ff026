use dev_utils::get_example_scenario;
use stochastic_csa::Planner;

fn main() {
    let (store, origin, start_time, _) = get_example_scenario();
    let planner = Planner::new(&store);

    let times = planner.times_from(&origin, start_time, 0.8).expect("origin exists in the fixture store");

    let mut reachable: Vec<_> = times.into_iter().collect();
    reachable.sort_by_key(|(_, minutes)| *minutes);

    println!("Nearest stations from {origin} at {start_time} (tolerance 0.8):");
    for (station, minutes) in reachable.into_iter().take(10) {
        println!("{station:>12}: {minutes} min");
    }
}
