fn main() { orthbasis_tasks::entry_points::tabulate() }
