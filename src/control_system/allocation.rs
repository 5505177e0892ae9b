/// Splits the cycle's green-time pool across the roads in proportion to their
/// vehicle tallies.
///
/// With no demand anywhere, every road gets an equal `pool / num_roads` share
/// (integer division; the remainder seconds go unused rather than being handed
/// to any one road). Otherwise a road with zero tally gets `min_green`, and a
/// road with demand gets its rounded proportional share of the pool, clamped
/// into `[min_green, max_green]`.
///
/// Clamping is not followed by renormalization, so the allocated total may
/// undershoot the pool when a dominant road saturates at `max_green`. That
/// shortfall is intentional and must not be redistributed.
pub fn allocate(tallies: &[u32], pool: u32, min_green: u32, max_green: u32) -> Vec<u32> {
    let total: u32 = tallies.iter().sum();
    if total == 0 {
        let share = pool / tallies.len().max(1) as u32;
        return vec![share; tallies.len()];
    }

    tallies
        .iter()
        .map(|&tally| {
            if tally == 0 {
                min_green
            } else {
                let ideal = (tally as f64 / total as f64) * pool as f64;
                (ideal.round() as u32).clamp(min_green, max_green)
            }
        })
        .collect()
}
